//! Convert `curl` commands into a canonical request model and Python code.
//!
//! # Overview
//! `parse` turns command text into a `RequestModel`; `generate` renders a
//! model as a standalone Python `requests` script. Both are pure and never
//! fail. For actually sending a request, `HttpRequest::from_execute` builds
//! plain request data and the caller performs the I/O (host-does-IO
//! pattern), handing the result back as an `HttpResponse`.
//!
//! # Design
//! - The model is plain owned data (`String`, ordered maps) so it crosses
//!   the HTTP and C boundaries without lifetime concerns.
//! - Bodies stay text, tagged `Raw` or `JsonLiteral`; the generator and the
//!   execute path each decide the encoding from that tag.
//! - Errors exist only at boundaries (`ConvertError`).

pub mod error;
pub mod generator;
pub mod http;
pub mod model;
pub mod parser;

pub use error::ConvertError;
pub use generator::generate;
pub use http::{ExecuteOutcome, ExecuteRequest, HttpRequest, HttpResponse};
pub use model::{Body, FieldMap, Method, RequestModel};
pub use parser::parse;

/// Parse `command` and render it as Python in one step.
pub fn convert(command: &str) -> String {
    generate(&parse(command))
}
