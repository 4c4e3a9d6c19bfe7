//! Axum HTTP handlers for the web server
//!
//! Provides the Model Context Protocol endpoint, its CORS preflight, and
//! general metadata endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::ParseErrorMode;
use crate::mcp::{
    rpc::{JsonRpcRequest, JsonRpcResponse},
    server::handle_json_rpc_request,
};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub mcp_endpoint: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery(State(state): State<AppState>) -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        mcp_endpoint: state.mcp_path.to_string(),
    })
}

pub async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match JsonRpcRequest::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return match state.parse_errors {
                ParseErrorMode::Http => err.into_response(),
                ParseErrorMode::JsonRpc => {
                    tracing::warn!(error = %err, "answering malformed body with parse error");
                    (StatusCode::OK, Json(JsonRpcResponse::parse_error())).into_response()
                }
            }
        }
    };

    match handle_json_rpc_request(request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn mcp_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
