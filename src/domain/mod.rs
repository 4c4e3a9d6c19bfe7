//! Tool and resource implementations exposed over the MCP protocol

pub mod resources;
pub mod tools;
pub mod widget;
