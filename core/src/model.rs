//! The canonical request model shared by the parser, the generator and the
//! executor boundary.
//!
//! # Design
//! `RequestModel` is plain data produced fresh per parse call. Headers and
//! form fields live in insertion-ordered maps: inserting an existing key
//! replaces its value but keeps its original position, which is exactly the
//! duplicate-key policy the parser needs.
//!
//! The body is kept as text even when it looks like JSON, so the generator
//! can choose between a native literal and a quoted string without losing
//! the original spelling. On the wire (`data`) a JSON-looking body that
//! actually parses is emitted as a JSON object; everything else is a string.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Ordered string map used for headers and form fields.
pub type FieldMap = IndexMap<String, String>;

/// HTTP method of a parsed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
        Method::Head,
        Method::Options,
    ];

    /// Recognize a verb token case-insensitively.
    pub fn from_token(token: &str) -> Option<Method> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(token.trim()))
    }

    /// Like `from_token`, but unknown verbs become `GET`.
    pub fn from_token_or_get(token: &str) -> Method {
        Method::from_token(token).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    /// Whether an executed request of this method carries a body.
    pub fn sends_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Method {
    fn from(token: String) -> Self {
        Method::from_token_or_get(&token)
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

/// Request body, tagged by how it should be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Opaque text.
    Raw(String),
    /// Text whose trimmed form is `{ ... }`. Not guaranteed to be valid JSON.
    JsonLiteral(String),
}

impl Body {
    /// Tag `text` as `JsonLiteral` when its trimmed form starts with `{` and
    /// ends with `}`, otherwise as `Raw`.
    pub fn classify(text: impl Into<String>) -> Body {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            Body::JsonLiteral(text)
        } else {
            Body::Raw(text)
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Body::Raw(text) | Body::JsonLiteral(text) => text,
        }
    }

    pub fn is_json_literal(&self) -> bool {
        matches!(self, Body::JsonLiteral(_))
    }

    /// The decoded JSON value of a `JsonLiteral` body, if its text parses.
    pub fn json_value(&self) -> Option<Value> {
        match self {
            Body::JsonLiteral(text) => serde_json::from_str(text.trim()).ok(),
            Body::Raw(_) => None,
        }
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.json_value() {
            Some(value @ Value::Object(_)) => value.serialize(serializer),
            _ => serializer.serialize_str(self.text()),
        }
    }
}

impl<'de> Deserialize<'de> for Body {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => Body::classify(text),
            object @ Value::Object(_) => Body::JsonLiteral(object.to_string()),
            other => Body::Raw(other.to_string()),
        })
    }
}

/// A single HTTP request in canonical form.
///
/// Serializes with the field names `url`, `method`, `headers`, `data` and
/// `form_data`. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestModel {
    pub url: String,
    pub method: Method,
    pub headers: FieldMap,
    #[serde(rename = "data")]
    pub body: Option<Body>,
    #[serde(rename = "form_data")]
    pub form_fields: FieldMap,
}
