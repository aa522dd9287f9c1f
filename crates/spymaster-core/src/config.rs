//! Client configuration.
//!
//! Values are resolved in three layers: built-in defaults, then environment
//! variables, then explicit overrides (CLI flags).
//!
//! | Setting | Env var | Default |
//! |---------|---------|---------|
//! | base url | `SPYMASTER_BASE_URL` | `http://127.0.0.1:8000` |
//! | timeout | `SPYMASTER_TIMEOUT_MS` | `3000` |
//! | fetch news | `SPYMASTER_NEWS` | `true` |

use std::env;

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::ValidationError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const ENV_BASE_URL: &str = "SPYMASTER_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "SPYMASTER_TIMEOUT_MS";
pub const ENV_NEWS: &str = "SPYMASTER_NEWS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout_ms: u64,
    include_news: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            include_news: true,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with whatever `SPYMASTER_*` variables are set.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(base_url)?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let timeout_ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidSetting {
                    key: ENV_TIMEOUT_MS,
                    value: raw.clone(),
                })?;
            config = config.with_timeout_ms(timeout_ms)?;
        }

        if let Some(raw) = lookup(ENV_NEWS) {
            config.include_news = parse_flag(&raw).ok_or(ValidationError::InvalidSetting {
                key: ENV_NEWS,
                value: raw,
            })?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ValidationError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let has_host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ValidationError::InvalidBaseUrl { value: base_url });
        }
        self.base_url = trimmed.to_owned();
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ValidationError> {
        if timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    pub fn with_news(mut self, include_news: bool) -> Self {
        self.include_news = include_news;
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub const fn include_news(&self) -> bool {
        self.include_news
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url(), "http://127.0.0.1:8000");
        assert!(config.include_news());
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://stocks.internal/"),
            (ENV_TIMEOUT_MS, "1500"),
            (ENV_NEWS, "off"),
        ]))
        .expect("valid env");
        assert_eq!(config.base_url(), "https://stocks.internal");
        assert_eq!(config.timeout_ms(), 1_500);
        assert!(!config.include_news());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ClientConfig::default()
            .with_base_url("ftp://example.test")
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBaseUrl { .. }));
        assert!(ClientConfig::default().with_base_url("http://").is_err());
    }

    #[test]
    fn rejects_bad_timeout_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")]))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSetting { key: ENV_TIMEOUT_MS, .. }));
        assert_eq!(
            ClientConfig::default().with_timeout_ms(0),
            Err(ValidationError::ZeroTimeout)
        );
    }
}
