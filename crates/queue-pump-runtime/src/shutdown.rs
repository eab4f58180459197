//! Cooperative shutdown coordination.
//!
//! A single process-wide flag, set exactly once by the signal listener and
//! observed at iteration boundaries by every loop and by the retry
//! executor. Cancellation is cooperative only: an operation already in
//! flight always completes before the flag takes effect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Process-wide cancellation flag.
///
/// Cloning shares the underlying flag. The flag transitions false -> true
/// exactly once and is never cleared, so a plain atomic is sufficient.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    requested: Arc<AtomicBool>,
}

impl ShutdownFlag {
    /// Create a new flag in the not-requested state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Idempotent; only the first call logs.
    pub fn request(&self) {
        if !self.requested.swap(true, Ordering::SeqCst) {
            info!("Shutdown requested; loops will stop at the next iteration boundary");
        }
    }

    /// Check whether shutdown has been requested
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then flip the flag.
///
/// Completes once a signal has been observed, so the returned future also
/// serves as a graceful-shutdown trigger for `axum::serve`. The core never
/// observes OS signals directly, only the flag.
pub async fn listen_for_signals(flag: ShutdownFlag) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), finishing current batch and shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, finishing current batch and shutting down gracefully");
        },
    }

    flag.request();
}

#[cfg(test)]
#[path = "shutdown_tests.rs"]
mod tests;
