//! Model Context Protocol static resource providers
//!
//! Exposes the greeting widget HTML under its `ui://` URI.

use rust_mcp_sdk::schema::{
    ReadResourceContent, ReadResourceResult, Resource, TextResourceContents,
};
use serde_json::{Map, Value};

use crate::domain::widget::{WIDGET_HTML, WIDGET_MIME_TYPE, WIDGET_NAME, WIDGET_URI};
use crate::errors::AppError;
use crate::mcp::rpc::value_text;

pub fn build_resources_list() -> Vec<Resource> {
    vec![Resource {
        annotations: None,
        description: None,
        icons: vec![],
        meta: None,
        mime_type: Some(WIDGET_MIME_TYPE.to_string()),
        name: WIDGET_NAME.to_string(),
        size: None,
        title: None,
        uri: WIDGET_URI.to_string(),
    }]
}

pub fn handle_resources_read(params: Map<String, Value>) -> Result<Value, AppError> {
    if params.get("uri").and_then(Value::as_str) != Some(WIDGET_URI) {
        return Err(AppError::unknown_resource(value_text(params.get("uri"))));
    }

    let result = ReadResourceResult {
        contents: vec![ReadResourceContent::from(TextResourceContents {
            meta: None,
            mime_type: Some(WIDGET_MIME_TYPE.to_string()),
            text: WIDGET_HTML.to_string(),
            uri: WIDGET_URI.to_string(),
        })],
        meta: None,
    };

    Ok(serde_json::to_value(result)?)
}
