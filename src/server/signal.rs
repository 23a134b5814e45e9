// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Signal handler state
pub struct SignalHandler {
    /// Notified once when a shutdown signal arrives
    pub shutdown: Arc<Notify>,
    /// Whether shutdown has been requested
    pub shutdown_requested: Arc<AtomicBool>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Record the request and wake the server loop.
    ///
    /// Uses `notify_one` so the wakeup is kept even if the loop is not
    /// waiting at that moment.
    pub fn request_shutdown(&self, signal: &str) {
        if self.shutdown_requested.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!("{signal} received, initiating graceful shutdown");
        self.shutdown.notify_one();
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the signal listener task (Unix)
///
/// Must be called from within a Tokio runtime. Registration failures are
/// returned so the caller can refuse to start.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tracing::debug!("Signal handlers registered (SIGTERM, SIGINT), pid {}", std::process::id());

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => handler.request_shutdown("SIGTERM"),
            _ = sigint.recv() => handler.request_shutdown("SIGINT"),
        }
    });

    Ok(())
}

/// Non-Unix fallback, only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) -> std::io::Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => handler.request_shutdown("Ctrl+C"),
            Err(e) => tracing::error!("Failed to listen for Ctrl+C: {e}"),
        }
    });

    Ok(())
}
