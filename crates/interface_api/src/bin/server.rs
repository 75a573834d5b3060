//! Plot Registry - API Server Binary
//!
//! This binary starts the HTTP API server for the plot registry.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin registry-api
//!
//! # Run with environment variables
//! REGISTRY_PORT=9000 REGISTRY_SEED_PATH=files.json cargo run --bin registry-api
//! ```
//!
//! # Environment Variables
//!
//! * `REGISTRY_HOST` - Server host (default: 0.0.0.0)
//! * `REGISTRY_PORT` - Server port (default: 8080)
//! * `REGISTRY_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `REGISTRY_TIMEZONE` - IANA timezone of the registry office (default: Asia/Karachi)
//! * `REGISTRY_EXPORT_PREFIX` - CSV export file name prefix (default: DIN_Property_Registry)
//! * `REGISTRY_SEED_PATH` - JSON array of property files to load at startup

use anyhow::Context;
use interface_api::{config::RegistryConfig, create_router, seed::build_portal};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration and the optional seed file,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The seed file cannot be read or holds duplicate file numbers
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = RegistryConfig::from_env().context("invalid REGISTRY_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        timezone = %config.timezone,
        "Starting Plot Registry API Server"
    );

    let portal = build_portal(&config).context("failed to load registry")?;

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let app = create_router(portal, config);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
