//! Signal handling for cancelling an in-flight send.

/// Completes when SIGINT (Ctrl+C) is received.
///
/// If the handler cannot be installed, this never completes.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received SIGINT, cancelling event delivery"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    }
}
