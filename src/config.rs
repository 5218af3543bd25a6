//! Simulator configuration from `MATCH3_*` environment variables.

use std::env;
use std::str::FromStr;

/// Settings for one simulated game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub seed: u32,
    pub target_score: u32,
    pub maximum_moves: u32,
    pub symbol_count: u8,
    pub policy: String,
    /// JSON-lines turn log
    pub log_path: Option<String>,
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            target_score: 1000,
            maximum_moves: 15,
            symbol_count: 5,
            policy: "greedy".to_string(),
            log_path: None,
            quiet: false,
        }
    }
}

impl SimConfig {
    /// Read overrides from the environment; unparseable values keep the default
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let policy = lookup("MATCH3_POLICY")
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.policy);

        let log_path = lookup("MATCH3_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let quiet = lookup("MATCH3_QUIET")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            seed: parse_var(&lookup, "MATCH3_SEED").unwrap_or(defaults.seed),
            target_score: parse_var(&lookup, "MATCH3_TARGET").unwrap_or(defaults.target_score),
            maximum_moves: parse_var(&lookup, "MATCH3_MOVES").unwrap_or(defaults.maximum_moves),
            symbol_count: parse_var(&lookup, "MATCH3_SYMBOLS").unwrap_or(defaults.symbol_count),
            policy,
            log_path,
            quiet,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}
