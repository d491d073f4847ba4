//! Graceful shutdown on SIGTERM / SIGINT.
//!
//! The HTTP server stops accepting connections once [`wait_for_signal`]
//! resolves and drains in-flight requests before `main` closes the pool.

use tracing::{error, info};

/// Wait for SIGTERM or SIGINT.
///
/// Returns the name of the signal that was received. If the SIGTERM handler
/// cannot be registered, only Ctrl-C is awaited.
#[cfg(unix)]
pub async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to register SIGTERM handler");
            return ctrl_c().await;
        }
    };

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        name = ctrl_c() => name,
    };
    info!(signal = name, "Received shutdown signal");
    name
}

#[cfg(not(unix))]
pub async fn wait_for_signal() -> &'static str {
    let name = ctrl_c().await;
    info!(signal = name, "Received shutdown signal");
    name
}

async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        // Without a working handler there is nothing to wait on.
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
