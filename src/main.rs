//! Payments: a stub payments API.
//!
//! This is the application entry point. It loads configuration, initializes
//! tracing, sets up the Axum router and starts the HTTP server.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payments::config::{AppConfig, LogFormat, ProcessingMode, DEFAULT_LOG_FILTER};
use payments::{create_router, AppState};

/// Payments: a stub payments API
#[derive(Parser, Debug)]
#[command(name = "payments", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "payments=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Address to bind, overrides http.host
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides http.port
    #[arg(short, long)]
    port: Option<u16>,

    /// How valid payments are decided, overrides payments.mode
    #[arg(short, long, value_enum)]
    mode: Option<ProcessingMode>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(mode) = args.mode {
        config.payments.mode = mode;
    }
    config.validate()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    match config.logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(
        mode = ?config.payments.mode,
        token_bytes = config.payments.token_bytes,
        "Loaded configuration"
    );

    let state = AppState::new(config.clone());
    let app = create_router(state);

    payments::http::start_server(app, &config).await?;

    Ok(())
}
