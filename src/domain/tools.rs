//! Interactive tools exposed via Model Context Protocol
//!
//! Provides the `hello_world` tool, which greets a name and hands the host a
//! widget template to render the greeting with.

use chrono::{Local, NaiveDateTime};
use rust_mcp_sdk::{
    macros,
    schema::{CallToolRequestParams, CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::widget::widget_meta;
use crate::errors::AppError;
use crate::mcp::rpc::value_text;

pub const HELLO_WORLD_TOOL_NAME: &str = "hello_world";
pub const DEFAULT_GREETING_NAME: &str = "World";

/// ISO-8601 local time without offset, microsecond precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[macros::mcp_tool(name = "hello_world", description = "Display a greeting widget")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct HelloWorldTool {
    /// Name to greet
    pub name: String,
}

// The advertised schema requires `name`, but calls without it still greet the
// default name, so arguments are read through this looser shape.
#[derive(Debug, Deserialize)]
pub struct HelloWorldArgs {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub message: String,
    pub timestamp: String,
}

impl Greeting {
    pub fn now(name: &str) -> Self {
        Self::at(name, Local::now().naive_local())
    }

    pub fn at(name: &str, time: NaiveDateTime) -> Self {
        Self {
            message: format!("Hello, {name}!"),
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

pub fn build_tools_list() -> Vec<Tool> {
    vec![HelloWorldTool::tool()]
}

pub fn handle_tools_call(params: Map<String, Value>) -> Result<Value, AppError> {
    if params.get("name").and_then(Value::as_str) != Some(HELLO_WORLD_TOOL_NAME) {
        return Err(AppError::unknown_tool(value_text(params.get("name"))));
    }

    let tool_call: CallToolRequestParams =
        serde_json::from_value(Value::Object(params)).map_err(|_| AppError::InvalidParams)?;
    let args: HelloWorldArgs =
        serde_json::from_value(Value::Object(tool_call.arguments.unwrap_or_default()))
            .map_err(|_| AppError::InvalidParams)?;
    let name = args.name.as_deref().unwrap_or(DEFAULT_GREETING_NAME);

    let result = greeting_result(name, &Greeting::now(name));
    Ok(serde_json::to_value(result)?)
}

fn greeting_result(name: &str, greeting: &Greeting) -> CallToolResult {
    CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(
            format!("Showing greeting for {name}"),
            None,
            None,
        ))],
        is_error: None,
        meta: Some(widget_meta()),
        structured_content: Some(Map::from_iter([
            ("message".to_string(), json!(greeting.message)),
            ("timestamp".to_string(), json!(greeting.timestamp)),
        ])),
    }
}
