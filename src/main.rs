//! Status Cache - A caching proxy for HTTP status code images
//!
//! Serves images keyed by a three-digit status code from a local disk
//! cache, filling missing entries from a remote origin on demand.

mod api;
mod cache;
mod config;
mod error;
mod key;
mod origin;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::{DiskStore, ImageCache};
use config::Config;
use origin::HttpOrigin;

/// Main entry point for the image cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache root directory if absent
/// 4. Wire the disk store and origin client into the cache service
/// 5. Create the Axum router
/// 6. Start the HTTP server on the configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
///
/// Any startup failure aborts the process with a non-zero exit.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "status_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Status Cache Server");

    // Load configuration from environment variables
    let config = Config::from_env().context("configuration error")?;
    info!(
        "Configuration loaded: host={}, port={}, cache_dir={}, origin={}",
        config.host,
        config.port,
        config.cache_dir.display(),
        config.origin_url
    );

    // Create the cache root before accepting requests
    let disk = DiskStore::new(&config.cache_dir);
    disk.ensure_root().await.with_context(|| {
        format!(
            "failed to create cache directory {}",
            config.cache_dir.display()
        )
    })?;

    // Wire explicit dependencies into the cache service
    let http_origin =
        HttpOrigin::new(&config.origin_url).context("failed to create origin client")?;
    let state = AppState::new(ImageCache::new(disk, Arc::new(http_origin)));

    // Create router
    let app = create_router(state);

    // Bind to the configured address
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    info!("Server listening on http://{}:{}", config.host, config.port);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
