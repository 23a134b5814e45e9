//! Logger module
//!
//! Installs the `tracing` subscriber and provides the server's log events:
//! - Server lifecycle logging
//! - Access logging with multiple formats (target `access`)
//! - Connection warnings and errors

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat, LoggingConfig};
use crate::recommend::RuleTable;

/// Initialize the global subscriber
///
/// Should be called once at application startup. `RUST_LOG` takes
/// precedence over `logging.level`.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let json = config.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with((!json).then(|| fmt::layer().with_target(false).compact()))
        .with(json.then(|| fmt::layer().json().flatten_event(true)))
        .try_init()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, rules: &RuleTable) {
    tracing::info!("======================================");
    tracing::info!("Recommendation service started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("  - POST http://{addr}/recommend");
    tracing::info!("  - GET  http://{addr}/health");
    match config.rules.path.as_deref() {
        Some(path) => tracing::info!("Rule table: {path} ({} rules)", rules.len()),
        None => tracing::info!("Rule table: built-in ({} rules)", rules.len()),
    }
    if rules.is_empty() {
        tracing::warn!("Rule table has no rules, every request gets the fallback list");
    }
    if !rules.fallback().is_empty() {
        tracing::info!("Fallback services: {}", rules.fallback().join(", "));
    }
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!("Max connections: {max}");
    }
    if !config.http.cors_allowed_origins.is_empty() {
        tracing::info!(
            "CORS origins: {}",
            config.http.cors_allowed_origins.join(", ")
        );
    }
    tracing::info!("======================================");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: "access", "{}", entry.format(format));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_shutdown_started(active_connections: usize) {
    tracing::info!("Shutdown signal received, no longer accepting connections");
    if active_connections > 0 {
        tracing::info!("Waiting for {active_connections} open connection(s) to finish");
    }
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("All connections closed, server stopped");
    } else {
        tracing::warn!("Shutdown timeout reached with {remaining} connection(s) still open");
    }
}
