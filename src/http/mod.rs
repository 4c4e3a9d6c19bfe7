//! HTTP Transport layer for the Model Context Protocol
//!
//! Provides the external API routing, including the MCP listener and other endpoints.

pub mod handlers;
