//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! The core never touches the network. `HttpRequest::from_execute` turns an
//! execute payload into plain request data, deciding the body encoding with
//! the same tagging rule the generator uses; the host (the server's executor,
//! or a test) performs the round-trip and hands back an `HttpResponse`, which
//! `ExecuteOutcome` reshapes for the caller.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConvertError;
use crate::model::{Body, FieldMap, Method, RequestModel};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Payload of the execute operation: `{ url, method, headers, data }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteRequest {
    pub url: String,
    pub method: Method,
    pub headers: FieldMap,
    pub data: Option<Body>,
}

impl From<&RequestModel> for ExecuteRequest {
    fn from(model: &RequestModel) -> Self {
        Self {
            url: model.url.clone(),
            method: model.method,
            headers: model.headers.clone(),
            data: model.body.clone(),
        }
    }
}

/// An HTTP request described as plain data, ready for any HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Build the wire request for an execute payload.
    ///
    /// Bodies are only attached for methods that send one. A JSON literal
    /// that parses is sent as compact JSON; any other body is sent verbatim.
    /// A matching `Content-Type` is added unless the caller set one.
    pub fn from_execute(req: ExecuteRequest) -> Result<Self, ConvertError> {
        let url = req.url.trim().to_string();
        if url.is_empty() {
            return Err(ConvertError::EmptyUrl);
        }

        let mut headers: Vec<(String, String)> = req.headers.into_iter().collect();
        let body = match req.data {
            Some(data) if req.method.sends_body() => {
                let (body, content_type) = match data.json_value() {
                    Some(value) => (value.to_string(), CONTENT_TYPE_JSON),
                    None => (data.text().to_string(), CONTENT_TYPE_FORM),
                };
                if !has_header(&headers, "content-type") {
                    headers.push(("Content-Type".to_string(), content_type.to_string()));
                }
                Some(body)
            }
            _ => None,
        };

        Ok(Self {
            method: req.method,
            url,
            headers,
            body,
        })
    }
}

fn has_header(headers: &[(String, String)], name: &str) -> bool {
    headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Successful result of the execute operation:
/// `{ status_code, headers, content }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteOutcome {
    pub status_code: u16,
    pub headers: IndexMap<String, String>,
    pub content: Value,
}

impl From<HttpResponse> for ExecuteOutcome {
    /// Repeated response headers are joined with `", "`. A body that parses
    /// as JSON becomes a JSON value, anything else stays a string.
    fn from(response: HttpResponse) -> Self {
        let mut headers: IndexMap<String, String> = IndexMap::new();
        for (name, value) in response.headers {
            let name = name.to_ascii_lowercase();
            match headers.get_mut(&name) {
                Some(existing) => {
                    existing.push_str(", ");
                    existing.push_str(&value);
                }
                None => {
                    headers.insert(name, value);
                }
            }
        }

        let content = serde_json::from_str(&response.body).unwrap_or(Value::String(response.body));

        Self {
            status_code: response.status,
            headers,
            content,
        }
    }
}
