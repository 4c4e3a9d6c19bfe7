use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ParseErrorMode;
use crate::AppState;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Which part of the server a request path lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Mcp,
    Health,
    Discovery,
    Unrouted,
}

impl RouteKind {
    pub fn classify(path: &str, mcp_path: &str) -> Self {
        match path {
            _ if path == mcp_path => Self::Mcp,
            "/health" => Self::Health,
            "/.well-known/mcp" => Self::Discovery,
            _ => Self::Unrouted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mcp => "mcp",
            Self::Health => "health",
            Self::Discovery => "discovery",
            Self::Unrouted => "unrouted",
        }
    }
}

pub async fn request_logging_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let route = RouteKind::classify(request.uri().path(), &state.mcp_path);
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        route = route.as_str(),
        status = status.as_u16(),
        duration_ms = elapsed_ms,
        "request summary"
    );

    if status.is_server_error() {
        match (route, state.parse_errors) {
            (RouteKind::Mcp, ParseErrorMode::Http) => warn!(
                method = %method,
                mcp_path = %state.mcp_path,
                status = status.as_u16(),
                "mcp body rejected at transport level; MCP_PARSE_ERRORS=jsonrpc answers with -32700 instead"
            ),
            (route, mode) => warn!(
                method = %method,
                route = route.as_str(),
                parse_errors = ?mode,
                status = status.as_u16(),
                "request failed"
            ),
        }
    }

    response
}
