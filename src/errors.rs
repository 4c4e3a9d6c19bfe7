use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const PARSE_ERROR: i32 = -32700;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not found: {method}")]
    MethodNotFound { method: String },
    #[error("Invalid params")]
    InvalidParams,
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
    #[error("Unknown resource: {uri}")]
    UnknownResource { uri: String },
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    pub fn unknown_resource(uri: impl Into<String>) -> Self {
        Self::UnknownResource { uri: uri.into() }
    }

    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self::MalformedBody(reason.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// JSON-RPC error code for failures that are reported inside an envelope.
    ///
    /// `None` means the failure happened below the JSON-RPC layer and is
    /// answered at HTTP level instead.
    pub fn rpc_code(&self) -> Option<i32> {
        match self {
            Self::MethodNotFound { .. } => Some(METHOD_NOT_FOUND),
            Self::InvalidParams | Self::UnknownTool { .. } | Self::UnknownResource { .. } => {
                Some(INVALID_PARAMS)
            }
            Self::MalformedBody(_) | Self::Internal(_) => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("result serialization failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::MalformedBody(reason) => {
                tracing::warn!(error = %reason, "rejecting malformed request body");
            }
            Self::Internal(message) => {
                tracing::error!(error = %message, "request failed with internal error");
            }
            _ => {}
        }

        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
