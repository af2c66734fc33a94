//! Configuration for the runner.
//!
//! All configuration is loaded from environment variables with defaults, so
//! the binary runs unconfigured against the public search endpoint.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::RunnerError;

/// Complete runner configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Base URL of the character search service.
    pub search_api_url: String,
    /// Path of the persisted cache state file.
    pub cache_path: PathBuf,
    /// Fixed delay between resolution cycles. This is the rate limit
    /// protecting the search service from sighting bursts.
    pub poll_interval: Duration,
    /// Per-request timeout for search calls.
    pub request_timeout: Duration,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `SEARCH_API_URL` -- search service base URL (default `https://xivapi.com`)
    /// - `CACHE_PATH` -- cache state file (default `retrace-cache.json`)
    /// - `POLL_INTERVAL_MS` -- resolution cadence in milliseconds (default 1000)
    /// - `REQUEST_TIMEOUT_MS` -- search request timeout in milliseconds (default 5000)
    pub fn from_env() -> Result<Self, RunnerError> {
        let search_api_url = std::env::var("SEARCH_API_URL")
            .unwrap_or_else(|_| "https://xivapi.com".to_owned());

        let cache_path = std::env::var("CACHE_PATH")
            .unwrap_or_else(|_| "retrace-cache.json".to_owned());

        let poll_interval_ms = env_millis("POLL_INTERVAL_MS", 1000)?;
        let request_timeout_ms = env_millis("REQUEST_TIMEOUT_MS", 5000)?;

        Ok(Self {
            search_api_url,
            cache_path: PathBuf::from(cache_path),
            poll_interval: Duration::from_millis(poll_interval_ms),
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }
}

/// Read an optional millisecond environment variable with a default.
fn env_millis(name: &str, default: u64) -> Result<u64, RunnerError> {
    match std::env::var(name) {
        Ok(raw) => parse_millis(name, &raw),
        Err(_) => Ok(default),
    }
}

/// Parse a millisecond value, naming the offending variable on failure.
fn parse_millis(name: &str, raw: &str) -> Result<u64, RunnerError> {
    raw.parse()
        .map_err(|e| RunnerError::Config(format!("invalid {name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        // Variables unset in the test environment fall back to defaults.
        let interval = env_millis("RETRACE_TEST_UNSET_INTERVAL", 1000).unwrap_or(0);
        assert_eq!(interval, 1000);
    }

    #[test]
    fn valid_millis_parse() {
        let parsed = parse_millis("POLL_INTERVAL_MS", "250").unwrap_or(0);
        assert_eq!(parsed, 250);
    }

    #[test]
    fn invalid_millis_is_a_config_error() {
        let result = parse_millis("POLL_INTERVAL_MS", "not-a-number");
        assert!(matches!(result, Err(RunnerError::Config(_))));
    }
}
