use hello_world_mcp::{build_app, config::Config, logging, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let bind_socket = config.bind_socket()?;
    let state = AppState::from_config(&config);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        mcp_path = %config.mcp_path,
        parse_errors = ?config.parse_errors,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
