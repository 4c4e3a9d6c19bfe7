use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;

use config::{Config, ParseErrorMode};

#[derive(Debug, Clone)]
pub struct AppState {
    pub mcp_path: Arc<str>,
    pub parse_errors: ParseErrorMode,
}

impl AppState {
    pub fn new(mcp_path: impl Into<Arc<str>>, parse_errors: ParseErrorMode) -> Self {
        Self {
            mcp_path: mcp_path.into(),
            parse_errors,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mcp_path.as_str(), config.parse_errors)
    }
}

pub fn build_app(state: AppState) -> Router {
    let mcp_path = Arc::clone(&state.mcp_path);

    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/mcp", get(http::handlers::discovery))
        .route(
            &mcp_path,
            post(http::handlers::mcp_endpoint).options(http::handlers::mcp_preflight),
        )
        .fallback(http::handlers::not_found)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            logging::request_logging_middleware,
        ))
        .with_state(state)
}
