//! OS signal handling.
//!
//! Interrupt (Ctrl+C) and termination requests are the only external
//! triggers for shutdown. Uses Tokio's async-safe signal handling.

/// Wait for SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn wait_for_terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.expect("Failed to install Ctrl+C handler");
            tracing::info!(signal = "SIGINT", "termination signal received");
        }
        _ = sigterm.recv() => {
            tracing::info!(signal = "SIGTERM", "termination signal received");
        }
    }
}

/// Wait for Ctrl+C (non-unix platforms have no SIGTERM).
#[cfg(not(unix))]
pub async fn wait_for_terminate() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!(signal = "interrupt", "termination signal received");
}
