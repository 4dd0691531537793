//! duet-host - Container application entry point
//!
//! Serves the container page and its session/store APIs, and loads the
//! music library module from a separate deployment at first render.

use anyhow::{Context, Result};
use clap::Parser;
use duet_common::config::ConfigFile;
use duet_common::SharedSongStore;
use duet_host::registry::FederatedRegistry;
use duet_host::session::SessionStore;
use duet_host::storage::FileStorage;
use duet_host::{build_router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

const DEFAULT_PORT: u16 = 5173;
const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:5174";

/// Command-line arguments for duet-host
#[derive(Parser, Debug)]
#[command(name = "duet-host")]
#[command(about = "Container application for Duet")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "DUET_HOST_PORT")]
    port: Option<u16>,

    /// Base URL of the music library module deployment
    #[arg(short, long, env = "DUET_REMOTE_URL")]
    remote_url: Option<String>,

    /// Token storage file path
    #[arg(short, long, env = "DUET_STORAGE_PATH")]
    storage_path: Option<PathBuf>,
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
        "Starting Duet Container (duet-host) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = ConfigFile::load();
    let port = args
        .port
        .or_else(|| config.port("host", "port"))
        .unwrap_or(DEFAULT_PORT);
    let remote_url = args
        .remote_url
        .or_else(|| config.string("host", "remote_url"))
        .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string());
    let storage_path = args
        .storage_path
        .or_else(|| config.string("host", "storage_path").map(PathBuf::from))
        .unwrap_or_else(FileStorage::default_path);

    info!("Token storage: {}", storage_path.display());
    let storage = FileStorage::new(&storage_path);
    let session = Arc::new(SessionStore::restore(Box::new(storage)).await);

    info!("Library module remote: {}", remote_url);
    let registry =
        Arc::new(FederatedRegistry::new(&remote_url).context("Failed to build component registry")?);

    let state = AppState {
        session,
        store: SharedSongStore::new(),
        registry,
    };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("duet-host listening on http://{}", addr);
    info!("Container page: http://127.0.0.1:{}/", port);

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
