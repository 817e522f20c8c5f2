//! Connection settings for the backend.

use std::time::Duration;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://radim-brain-2025-be1cd52b04dc.herokuapp.com";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the base URL.
pub const ENV_BASE_URL: &str = "RADIM_API_URL";

/// Older name for [`ENV_BASE_URL`], consulted only when the former is unset.
pub const ENV_BASE_URL_LEGACY: &str = "RADIM_BRAIN_URL";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the base URL from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|url| !url.trim().is_empty());
        let base_url = non_blank(ENV_BASE_URL)
            .or_else(|| non_blank(ENV_BASE_URL_LEGACY))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = BackendConfig::from_lookup(env(&[]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn primary_var_wins_over_legacy() {
        let config = BackendConfig::from_lookup(env(&[
            (ENV_BASE_URL, "http://primary:8002"),
            (ENV_BASE_URL_LEGACY, "http://legacy:8002"),
        ]));
        assert_eq!(config.base_url, "http://primary:8002");
    }

    #[test]
    fn legacy_var_is_used_alone() {
        let config = BackendConfig::from_lookup(env(&[(ENV_BASE_URL_LEGACY, "http://legacy")]));
        assert_eq!(config.base_url, "http://legacy");
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        let config = BackendConfig::from_lookup(env(&[(ENV_BASE_URL, "  ")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
