//! Boundary error types.
//!
//! # Design
//! Parsing and generation do not fail on their own; these errors only arise
//! where a caller hands the core a payload, which is where they get reported
//! as `{ success: false, error }`.

use thiserror::Error;

/// Errors raised while validating a boundary payload.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A required top-level field was absent or null.
    #[error("missing `{0}` in request payload")]
    MissingField(&'static str),

    /// The payload could not be read as the expected JSON shape.
    #[error("invalid request payload: {0}")]
    InvalidPayload(String),

    /// An execute payload carried no url.
    #[error("request url is empty")]
    EmptyUrl,
}
