//! Client configuration.
//!
//! Resolves the REST base URL and request timeout used by [`HttpNoteClient`]
//! from explicit values or the process environment.
//!
//! [`HttpNoteClient`]: crate::client::HttpNoteClient

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::util::{is_http_url, normalize_text_option};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

pub const ENV_API_URL: &str = "NOTETAKER_API_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "NOTETAKER_HTTP_TIMEOUT_SECS";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid client configuration: {0}")]
    Invalid(String),
    #[error("Failed to construct HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without a trailing slash (e.g. `http://localhost:5000/api`)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            ..Self::default()
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match normalize_text_option(lookup(ENV_API_URL)) {
            Some(url) => Self::new(url)?,
            None => Self::default(),
        };

        if let Some(raw) = normalize_text_option(lookup(ENV_HTTP_TIMEOUT_SECS)) {
            let seconds = raw.parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_HTTP_TIMEOUT_SECS} must be a whole number"))
            })?;
            if seconds == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{ENV_HTTP_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            config.timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(ConfigError::Invalid(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(&base) {
        return Err(ConfigError::Invalid(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("localhost:5000/api").is_err());
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url(" http://localhost:5000/api/ ").unwrap(),
            "http://localhost:5000/api"
        );
    }

    #[test]
    fn from_lookup_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn from_lookup_reads_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_API_URL, "https://notes.example.com/api/"),
            (ENV_HTTP_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://notes.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let error =
            ClientConfig::from_lookup(lookup_from(&[(ENV_HTTP_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(error.to_string().contains(ENV_HTTP_TIMEOUT_SECS));

        assert!(ClientConfig::from_lookup(lookup_from(&[(ENV_HTTP_TIMEOUT_SECS, "0")])).is_err());
    }
}
