//! HTTP front end for the curl converter.
//!
//! Three JSON endpoints wrap the core: parse a curl command, generate Python
//! from a request model, and execute a request. Every failure is answered
//! with `400` and `{ "success": false, "error": "..." }`, including payloads
//! that are missing or not JSON.

pub mod config;
pub mod executor;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use curlconv_core::{
    generate, parse, ConvertError, ExecuteOutcome, ExecuteRequest, HttpRequest, RequestModel,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use config::ServerConfig;
use executor::ExecuteError;

#[derive(Clone)]
pub struct AppState {
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
pub struct ParseInput {
    pub curl_command: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseOutput {
    pub success: bool,
    pub data: RequestModel,
}

#[derive(Debug, Deserialize)]
pub struct GenerateInput {
    pub parsed_data: Option<RequestModel>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteOutput {
    pub success: bool,
    pub data: ExecuteOutcome,
}

/// Any failure reported at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Convert(ConvertError::InvalidPayload(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self, "request failed");
        let body = json!({ "success": false, "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

pub fn app(config: &ServerConfig) -> Router {
    let state = AppState {
        agent: executor::agent(config.execute_timeout),
    };
    Router::new()
        .route("/health", get(health))
        .route("/api/parse-curl", post(parse_curl))
        .route("/api/generate-code", post(generate_code))
        .route("/api/request-sender", post(send_request))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(&config)).await
}

async fn health() -> &'static str {
    "ok"
}

async fn parse_curl(
    payload: Result<Json<ParseInput>, JsonRejection>,
) -> Result<Json<ParseOutput>, ApiError> {
    let Json(input) = payload?;
    let command = input
        .curl_command
        .ok_or(ConvertError::MissingField("curl_command"))?;

    let model = parse(&command);
    info!(method = %model.method, url = %model.url, "parsed curl command");
    Ok(Json(ParseOutput {
        success: true,
        data: model,
    }))
}

async fn generate_code(
    payload: Result<Json<GenerateInput>, JsonRejection>,
) -> Result<Json<GenerateOutput>, ApiError> {
    let Json(input) = payload?;
    let model = input
        .parsed_data
        .ok_or(ConvertError::MissingField("parsed_data"))?;

    let code = generate(&model);
    info!(method = %model.method, bytes = code.len(), "generated code");
    Ok(Json(GenerateOutput {
        success: true,
        code,
    }))
}

async fn send_request(
    State(state): State<AppState>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<Json<ExecuteOutput>, ApiError> {
    let Json(input) = payload?;
    let req = HttpRequest::from_execute(input)?;
    info!(method = %req.method, url = %req.url, "sending request");

    let response = executor::execute(state.agent.clone(), req).await?;
    info!(status = response.status, "received response");
    Ok(Json(ExecuteOutput {
        success: true,
        data: ExecuteOutcome::from(response),
    }))
}
