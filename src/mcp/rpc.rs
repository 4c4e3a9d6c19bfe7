//! JSON-RPC envelope representations
//!
//! Requests are decoded leniently (only `method`, `id` and `params` matter) and
//! responses are built through constructors so that exactly one of `result` or
//! `error` is ever present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{AppError, PARSE_ERROR};

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub method: Value,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Decodes an HTTP body into a request envelope.
    ///
    /// The body must be UTF-8 JSON whose top-level value is an object.
    pub fn from_slice(body: &[u8]) -> Result<Self, AppError> {
        let payload: Value = serde_json::from_slice(body)
            .map_err(|err| AppError::malformed_body(err.to_string()))?;

        if !payload.is_object() {
            return Err(AppError::malformed_body(
                "request body must be a JSON object",
            ));
        }

        serde_json::from_value(payload).map_err(|err| AppError::malformed_body(err.to_string()))
    }

    /// The request params as an object; absent or `null` params are empty.
    pub fn params_object(&self) -> Result<Map<String, Value>, AppError> {
        match &self.params {
            Value::Null => Ok(Map::new()),
            Value::Object(map) => Ok(map.clone()),
            _ => Err(AppError::InvalidParams),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn parse_error() -> Self {
        Self::error(Value::Null, PARSE_ERROR, "Parse error")
    }

    pub fn id(&self) -> &Value {
        &self.id
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Text used when echoing a request member back in an error message.
///
/// Strings are used as-is, anything else as its JSON rendering, and a missing
/// member as `null`.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

/// Wraps an `AppError` in an error envelope when it has a JSON-RPC code.
///
/// Transport-level failures are handed back unchanged.
pub fn app_error_to_json_rpc(id: Value, err: AppError) -> Result<JsonRpcResponse, AppError> {
    match err.rpc_code() {
        Some(code) => Ok(JsonRpcResponse::error(id, code, err.to_string())),
        None => Err(err),
    }
}
