pub mod http;

use crate::{config::ServerConfig, media::MediaResolver};
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

pub async fn run(config: &ServerConfig, resolver: MediaResolver) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Fluxo extractor listening on {}", listener.local_addr()?);

    axum::serve(listener, http::router(resolver))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
