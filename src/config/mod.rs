// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LogFormat, LoggingConfig, PerformanceConfig};

/// Default configuration file (resolved as config.toml, config.yaml, ...)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `RECOMMENDER__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "RECOMMENDER";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Missing files are not an error; defaults and environment variables
    /// still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, Self::environment())
    }

    /// `RECOMMENDER__SECTION__KEY` variables; list values are comma-separated
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("http.cors_allowed_origins")
            .try_parsing(true)
    }

    fn load_with_env(
        config_path: &str,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("http.server_name", "service-recommender")?
            .set_default("http.max_body_size", 65_536)? // 64KB
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    /// Load from the default config file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
