//! Signal handling for graceful shutdown

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{info, warn};

/// Wait for SIGTERM or SIGINT. Falls back to Ctrl-C handling if the signal
/// handler cannot be installed.
pub async fn shutdown_signal() {
    match Signals::new([signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT]) {
        Ok(mut signals) => {
            if let Some(signal) = signals.next().await {
                info!("Received signal: {}", signal);
            }
        }
        Err(e) => {
            warn!("Failed to install signal handler: {}, falling back to Ctrl-C", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
            }
        }
    }
}
