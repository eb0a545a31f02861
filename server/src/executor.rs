//! Outbound HTTP for the execute operation.
//!
//! # Design
//! The core decides what to send (`HttpRequest`); this module only performs
//! the round-trip with a blocking ureq agent. Calls run on tokio's blocking
//! pool so the server's async workers are never stalled. Non-2xx statuses
//! are data, not errors: only transport failures are reported.

use std::time::Duration;

use curlconv_core::{HttpRequest, HttpResponse, Method};
use thiserror::Error;
use tracing::debug;

/// Largest response body read back from the target.
const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Connection, TLS, timeout or protocol failure.
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The blocking task panicked or was cancelled.
    #[error("request aborted: {0}")]
    Aborted(String),
}

/// Build the shared agent. Status codes are returned as data.
pub fn agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

/// Execute `req` on the blocking pool.
pub async fn execute(agent: ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ExecuteError> {
    tokio::task::spawn_blocking(move || execute_blocking(&agent, req))
        .await
        .map_err(|e| ExecuteError::Aborted(e.to_string()))?
}

/// Perform one HTTP round-trip synchronously.
pub fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ExecuteError> {
    debug!(method = %req.method, url = %req.url, body = req.body.is_some(), "executing request");

    let mut response = match req.method {
        Method::Get => with_headers(agent.get(&req.url), &req.headers).call(),
        Method::Delete => with_headers(agent.delete(&req.url), &req.headers).call(),
        Method::Head => with_headers(agent.head(&req.url), &req.headers).call(),
        Method::Options => with_headers(agent.options(&req.url), &req.headers).call(),
        Method::Post | Method::Put | Method::Patch => {
            let builder = match req.method {
                Method::Post => agent.post(&req.url),
                Method::Put => agent.put(&req.url),
                _ => agent.patch(&req.url),
            };
            let builder = with_headers(builder, &req.headers);
            match &req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    }?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = if req.method == Method::Head {
        String::new()
    } else {
        let bytes = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_vec()?;
        String::from_utf8_lossy(&bytes).into_owned()
    };

    debug!(status, "request completed");
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
