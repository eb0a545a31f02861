//! Python `requests` snippet generator.
//!
//! # Design
//! `generate` is a pure function of the model. The snippet is assembled in a
//! fixed order: imports, `url`, optional `headers`, optional `data`, optional
//! `files`, the call, then two print statements. Which keyword arguments a
//! call accepts is looked up in a small per-method table; methods without an
//! entry render with the `GET` shape.

mod python;

use crate::model::{Body, Method, RequestModel};

/// Name and accepted body parameters of one `requests` function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CallShape {
    function: &'static str,
    accepts_body: bool,
}

const GET_SHAPE: CallShape = CallShape {
    function: "get",
    accepts_body: false,
};

const CALL_TABLE: [(Method, CallShape); 4] = [
    (Method::Get, GET_SHAPE),
    (
        Method::Delete,
        CallShape {
            function: "delete",
            accepts_body: false,
        },
    ),
    (
        Method::Post,
        CallShape {
            function: "post",
            accepts_body: true,
        },
    ),
    (
        Method::Put,
        CallShape {
            function: "put",
            accepts_body: true,
        },
    ),
];

fn call_shape(method: Method) -> CallShape {
    CALL_TABLE
        .iter()
        .find(|(m, _)| *m == method)
        .map_or(GET_SHAPE, |(_, shape)| *shape)
}

/// How the `data` binding is handed to the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyParam {
    Json,
    Data,
}

impl BodyParam {
    fn argument(self) -> &'static str {
        match self {
            BodyParam::Json => "json=data",
            BodyParam::Data => "data=data",
        }
    }
}

/// Render `model` as a standalone Python script using `requests`.
///
/// Never fails. An empty url is bound as `""`.
pub fn generate(model: &RequestModel) -> String {
    let mut code = String::from("import requests\n\n");

    code.push_str(&format!("url = {}\n\n", python::string(&model.url)));

    if !model.headers.is_empty() {
        code.push_str("headers = {\n");
        for (key, value) in &model.headers {
            code.push_str(&format!(
                "    {}: {},\n",
                python::string(key),
                python::string(value)
            ));
        }
        code.push_str("}\n\n");
    }

    let body_param = model.body.as_ref().map(|body| {
        let (literal, param) = render_body(body);
        code.push_str(&format!("data = {literal}\n\n"));
        param
    });

    if !model.form_fields.is_empty() {
        code.push_str("files = {\n");
        for (key, value) in &model.form_fields {
            code.push_str(&format!(
                "    {}: (None, {}),\n",
                python::string(key),
                python::string(value)
            ));
        }
        code.push_str("}\n\n");
    }

    let shape = call_shape(model.method);
    let mut args = vec!["url"];
    if !model.headers.is_empty() {
        args.push("headers=headers");
    }
    if shape.accepts_body {
        match body_param {
            Some(param) => args.push(param.argument()),
            None if !model.form_fields.is_empty() => args.push("files=files"),
            None => {}
        }
    }

    code.push_str("# Send the request\n");
    code.push_str(&format!(
        "response = requests.{}({})\n\n",
        shape.function,
        args.join(", ")
    ));
    code.push_str("# Print the response\n");
    code.push_str("print(f\"Status Code: {response.status_code}\")\n");
    code.push_str("print(f\"Response: {response.text}\")\n");
    code
}

/// A JSON literal body that parses becomes a native dict; anything else is a
/// quoted string.
fn render_body(body: &Body) -> (String, BodyParam) {
    match body {
        Body::JsonLiteral(text) => match serde_json::from_str(text.trim()) {
            Ok(value) => (python::literal(&value), BodyParam::Json),
            Err(err) => {
                tracing::debug!(%err, "body is not valid JSON, rendering as string");
                (python::string(text), BodyParam::Data)
            }
        },
        Body::Raw(text) => (python::string(text), BodyParam::Data),
    }
}
