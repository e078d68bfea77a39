//! Restcheck sample API
//!
//! A reference task service exercised by the restcheck conformance kit.

use std::sync::Arc;

use clap::Parser;
use restcheck_sample_api::{ServerConfig, TaskStore, create_app, init_logging};
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        "Starting task service"
    );

    let store = Arc::new(TaskStore::new());
    let app = create_app(store, config.clone());
    serve(app, &config).await
}
