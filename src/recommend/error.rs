//! Recommendation error types

use thiserror::Error;

/// Failure of the recommendation function itself.
///
/// Requests are validated before they reach the function, so seeing this
/// outside of tests means a caller skipped validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("invalid input: `{field}` must be a non-empty string")]
    InvalidInput { field: &'static str },
}

/// Failure to build a rule table.
#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rule {rule}: {reason}")]
    Invalid { rule: String, reason: String },
}
