//! hlshost-server: HTTP front end for the hlshost loaders.
//!
//! This crate mounts one [`hlshost_media::Loader`] per configured delivery
//! mode behind an Axum router. It provides:
//!
//! - Master/media playlist and segment routes under `/{mode}/...`
//! - Health, status and on-demand reload endpoints
//! - A periodic reload task that swaps the parsed tree in place
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod router;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hlshost_core::config::Config;
use hlshost_media::{Parser, PlaylistStore, SystemClock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

/// Start the hlshost server.
///
/// Parses the playlist tree, builds the [`AppContext`], spawns the reload
/// task when an interval is configured, and serves until a shutdown signal is
/// received.
pub async fn start(config: Config) -> hlshost_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let master_path = config.source.master_playlist.clone();
    let store = tokio::task::spawn_blocking(move || PlaylistStore::open(master_path, Parser::new()))
        .await
        .map_err(|e| hlshost_core::Error::Internal(format!("spawn_blocking join error: {e}")))??;
    let store = Arc::new(store);
    {
        let snapshot = store.snapshot();
        tracing::info!(
            path = %store.master_path().display(),
            media_playlists = snapshot.media_playlists.len(),
            "Playlist tree loaded"
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| hlshost_core::Error::Internal(format!("Invalid server address: {e}")))?;
    let reload_interval = config.reload.interval();

    let ctx = AppContext::new(config, Arc::clone(&store), Arc::new(SystemClock::new()));

    // Cancellation token for graceful shutdown.
    let cancel = CancellationToken::new();

    let reload_handle = reload_interval
        .map(|interval| spawn_reload_task(Arc::clone(&store), interval, cancel.clone()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| hlshost_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting server on {addr}");

    let app = router::build_router(ctx);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await?;

    // Signal background tasks to stop.
    cancel.cancel();
    if let Some(handle) = reload_handle {
        let _ = handle.await;
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Re-parse the tree every `interval` until `cancel` fires.
///
/// Failed reloads keep the previous tree published.
pub fn spawn_reload_task(
    store: Arc<PlaylistStore>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; the tree was just parsed.
        ticker.tick().await;

        tracing::info!(interval_secs = interval.as_secs(), "Playlist reload task started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let store = Arc::clone(&store);
                    match tokio::task::spawn_blocking(move || store.reload()).await {
                        // Outcome is logged by the store.
                        Ok(_) => {}
                        Err(e) => tracing::error!("Reload task join error: {e}"),
                    }
                }
            }
        }

        tracing::debug!("Playlist reload task stopped");
    })
}

/// Wait for a shutdown signal (SIGINT or SIGTERM) or cancellation.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}
