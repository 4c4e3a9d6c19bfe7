//! The central Model Context Protocol engine
//!
//! Decodes the method of a JSON-RPC request into a closed set of supported
//! methods, runs the matching handler and wraps the outcome in a response
//! envelope echoing the request id.

use std::str::FromStr;

use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ListResourcesResult, ListToolsResult, ProtocolVersion,
    ServerCapabilities, ServerCapabilitiesResources, ServerCapabilitiesTools,
};
use serde_json::Value;
use tracing::info;

use crate::domain::{
    resources::{build_resources_list, handle_resources_read},
    tools::{build_tools_list, handle_tools_call},
};
use crate::errors::AppError;
use crate::mcp::rpc::{app_error_to_json_rpc, value_text, JsonRpcRequest, JsonRpcResponse};

pub const SUPPORTED_PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::ResourcesList => "resources/list",
            Self::ResourcesRead => "resources/read",
        }
    }

    /// Resolves the `method` member of a request.
    ///
    /// Non-string methods never match; the error message carries their JSON
    /// rendering.
    pub fn from_value(method: &Value) -> Result<Self, AppError> {
        match method {
            Value::String(name) => name.parse(),
            other => Err(AppError::method_not_found(value_text(Some(other)))),
        }
    }
}

impl FromStr for Method {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "initialize" => Ok(Self::Initialize),
            "tools/list" => Ok(Self::ToolsList),
            "tools/call" => Ok(Self::ToolsCall),
            "resources/list" => Ok(Self::ResourcesList),
            "resources/read" => Ok(Self::ResourcesRead),
            _ => Err(AppError::method_not_found(name)),
        }
    }
}

/// Runs one request to completion.
///
/// JSON-RPC level failures come back as an error envelope; only failures
/// below that layer are returned as `Err`.
pub fn handle_json_rpc_request(request: JsonRpcRequest) -> Result<JsonRpcResponse, AppError> {
    let outcome =
        Method::from_value(&request.method).and_then(|method| dispatch(method, &request));

    let response = match outcome {
        Ok(result) => JsonRpcResponse::result(request.id, result),
        Err(err) => app_error_to_json_rpc(request.id, err)?,
    };

    info!(
        method = %value_text(Some(&request.method)),
        outcome = if response.is_error() { "failure" } else { "success" },
        "mcp request handled"
    );

    Ok(response)
}

/// Runs the handler for `method`.
///
/// Only `tools/call` and `resources/read` look at `params`; the listing and
/// handshake methods answer the same way whatever was sent.
pub fn dispatch(method: Method, request: &JsonRpcRequest) -> Result<Value, AppError> {
    match method {
        Method::Initialize => Ok(serde_json::to_value(initialize_result())?),
        Method::ToolsList => Ok(serde_json::to_value(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: build_tools_list(),
        })?),
        Method::ToolsCall => handle_tools_call(request.params_object()?),
        Method::ResourcesList => Ok(serde_json::to_value(ListResourcesResult {
            meta: None,
            next_cursor: None,
            resources: build_resources_list(),
        })?),
        Method::ResourcesRead => handle_resources_read(request.params_object()?),
    }
}

pub fn initialize_result() -> InitializeResult {
    InitializeResult {
        server_info: Implementation {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: None,
            description: None,
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            resources: Some(ServerCapabilitiesResources {
                subscribe: None,
                list_changed: None,
            }),
            prompts: None,
            ..Default::default()
        },
        protocol_version: ProtocolVersion::V2024_11_05.into(),
        instructions: None,
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(body: Value) -> JsonRpcRequest {
        serde_json::from_value(body).expect("valid request envelope")
    }

    fn respond(body: Value) -> Value {
        let response = handle_json_rpc_request(request(body)).expect("dispatched");
        serde_json::to_value(response).expect("serializes")
    }

    #[test]
    fn parses_every_supported_method() {
        for method in [
            Method::Initialize,
            Method::ToolsList,
            Method::ToolsCall,
            Method::ResourcesList,
            Method::ResourcesRead,
        ] {
            assert_eq!(method.as_str().parse::<Method>().expect("known"), method);
        }
    }

    #[test]
    fn unknown_method_names_are_rejected() {
        let err = "prompts/list".parse::<Method>().expect_err("unknown method");
        assert_eq!(err.to_string(), "Method not found: prompts/list");

        let err = Method::from_value(&Value::Null).expect_err("missing method");
        assert_eq!(err.to_string(), "Method not found: null");

        let err = Method::from_value(&json!(7)).expect_err("numeric method");
        assert_eq!(err.to_string(), "Method not found: 7");
    }

    #[test]
    fn initialize_ignores_params() {
        let bare = respond(json!({"id": 1, "method": "initialize"}));
        let with_params = respond(json!({
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": "2099-01-01", "capabilities": {"x": {}}}
        }));

        assert_eq!(bare, with_params);
        assert_eq!(bare["result"]["protocolVersion"], SUPPORTED_PROTOCOL_VERSION);
        assert_eq!(bare["result"]["serverInfo"]["name"], "hello-world-mcp");
        assert_eq!(bare["result"]["serverInfo"]["version"], "1.0.0");
        assert!(bare["result"]["capabilities"]["tools"].is_object());
        assert!(bare["result"]["capabilities"]["resources"].is_object());
        assert!(bare["result"]["capabilities"]["prompts"].is_null());
    }

    #[test]
    fn ids_are_echoed_verbatim() {
        for id in [
            json!(null),
            json!(0),
            json!(-3),
            json!(1.5),
            json!("abc"),
            json!({"nested": [1, 2]}),
        ] {
            for method in ["initialize", "tools/list", "resources/list", "nope"] {
                let response = respond(json!({"id": id.clone(), "method": method}));
                assert_eq!(response["id"], id, "method {method}");
            }
        }
    }

    #[test]
    fn missing_id_is_echoed_as_null() {
        let response = respond(json!({"method": "tools/list"}));
        assert!(response.get("id").expect("id present").is_null());
    }

    #[test]
    fn unknown_method_returns_method_not_found() {
        let response = respond(json!({"id": 9, "method": "tools/delete"}));
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["error"]["message"], "Method not found: tools/delete");
        assert!(response.get("result").is_none());
    }

    #[test]
    fn listing_and_handshake_ignore_non_object_params() {
        for method in ["initialize", "tools/list", "resources/list"] {
            let bare = respond(json!({"id": 1, "method": method}));
            assert!(bare.get("result").is_some(), "method {method}");

            for params in [json!([1]), json!("x"), json!(5), json!(true)] {
                let response = respond(json!({"id": 1, "method": method, "params": params}));
                assert!(response.get("error").is_none(), "method {method}");
                assert_eq!(response, bare, "method {method}");
            }
        }
    }

    #[test]
    fn non_object_params_return_invalid_params() {
        let response = respond(json!({"id": 2, "method": "tools/call", "params": "hello_world"}));
        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(response["error"]["message"], "Invalid params");

        let response = respond(json!({"id": 2, "method": "resources/read", "params": [1]}));
        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(response["error"]["message"], "Invalid params");
    }

    #[test]
    fn tools_call_failures_are_invalid_params() {
        let response = respond(json!({
            "id": 3,
            "method": "tools/call",
            "params": {"name": "bogus"}
        }));
        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(response["error"]["message"], "Unknown tool: bogus");

        let response = respond(json!({"id": 4, "method": "tools/call", "params": {}}));
        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(response["error"]["message"], "Unknown tool: null");

        let response = respond(json!({"id": 5, "method": "resources/read"}));
        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(response["error"]["message"], "Unknown resource: null");
    }
}
