//! The greeting widget served to the host as an embeddable resource
//!
//! The host renders the HTML and injects the tool's structured output as
//! `window.openai.toolOutput`; the server only points the host at the
//! template through the tool result metadata.

use serde_json::{json, Map, Value};

pub const WIDGET_URI: &str = "ui://widget/hello.html";
pub const WIDGET_NAME: &str = "Hello Widget";
/// Signals an interactive widget the host may embed.
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
pub const WIDGET_HTML: &str = include_str!("../../assets/hello.html");

pub const OUTPUT_TEMPLATE_META_KEY: &str = "openai/outputTemplate";

pub fn widget_meta() -> Map<String, Value> {
    Map::from_iter([(OUTPUT_TEMPLATE_META_KEY.to_string(), json!(WIDGET_URI))])
}
