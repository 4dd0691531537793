//! duet-library - Music library module entry point
//!
//! Serves the library component to containers over the federation
//! endpoints, and a standalone demo page when visited directly.

use anyhow::{Context, Result};
use clap::Parser;
use duet_common::config::ConfigFile;
use duet_library::{build_router, AppState};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

const DEFAULT_PORT: u16 = 5174;

/// Command-line arguments for duet-library
#[derive(Parser, Debug)]
#[command(name = "duet-library")]
#[command(about = "Music library module for Duet")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "DUET_LIBRARY_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Duet Music Library (duet-library) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = ConfigFile::load();
    let port = args
        .port
        .or_else(|| config.port("library", "port"))
        .unwrap_or(DEFAULT_PORT);

    let state = AppState::new();
    info!("Standalone store seeded with {} songs", state.store.len().await);

    let app = build_router(state);

    // All interfaces: containers are often served from another host
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("duet-library listening on http://{}", addr);
    info!("Remote entry: http://127.0.0.1:{}/remote-entry.json", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
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
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
