// Application state module
// Built once at startup and shared read-only by every connection

use std::sync::Arc;

use super::types::Config;
use crate::recommend::{RuleTable, RuleTableError};

/// Application state
pub struct AppState {
    pub config: Config,
    pub rules: Arc<RuleTable>,
}

impl AppState {
    pub fn new(config: Config, rules: RuleTable) -> Self {
        Self {
            config,
            rules: Arc::new(rules),
        }
    }

    /// Build state, loading the rule table named by `rules.path` or the
    /// built-in table when unset
    pub fn from_config(config: Config) -> Result<Self, RuleTableError> {
        let rules = match config.rules.path.as_deref() {
            Some(path) => RuleTable::load(path)?,
            None => RuleTable::builtin()?,
        };
        Ok(Self::new(config, rules))
    }
}
