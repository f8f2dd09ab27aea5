//! HTTP server startup logic.

use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::{AppConfig, ConfigError};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid server configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = config.http.bind_addr()?;
    let grace = Duration::from_secs(config.http.shutdown_timeout_seconds);

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone(), grace);

    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
