// Startup and runtime errors of the server binary

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

use crate::recommend::RuleTableError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("server.workers must be at least 1")]
    InvalidWorkers,

    #[error("invalid listen address: {0}")]
    Address(String),

    #[error("failed to load rule table: {0}")]
    Rules(#[from] RuleTableError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
