//! Todoist MCP Server
//!
//! HTTP gateway exposing overdue and today's Todoist tasks through a small
//! tool-call protocol for LLM agents and developer tools.

use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todoist_mcp::config::McpConfig;
use todoist_mcp::server;
use todoist_mcp::todoist::TodoistClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("todoist_mcp=info".parse()?))
        .init();

    info!("Starting Todoist MCP Server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));

    // Fatal on any config problem: never serve without a token.
    let config = McpConfig::load()?;
    let client = Arc::new(TodoistClient::new(&config.todoist)?);
    let app = server::router(client);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!("   Listening on: {}", config.server.bind_address);
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Todoist MCP Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
