//! Shutdown signal handling.

use std::sync::Arc;

use tokio::signal;

use crate::infrastructure::ConnectionRegistry;

/// Resolve on Ctrl-C or SIGTERM, after closing every realtime channel.
///
/// Open WebSockets would otherwise keep graceful shutdown waiting.
pub async fn shutdown_signal(registry: Arc<ConnectionRegistry>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }

    let closed = registry.close_all().await;
    tracing::info!("Closed {} realtime channel(s)", closed);
}
