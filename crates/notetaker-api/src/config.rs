use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const ENV_BIND_ADDR: &str = "NOTETAKER_API_BIND_ADDR";
pub const ENV_PAGE_SIZE: &str = "NOTETAKER_PAGE_SIZE";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_PAGE_SIZE: &str = "5";
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Notes per page on `GET /api/notes`
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            page_size: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, ENV_BIND_ADDR, DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|_| {
                ConfigError::Invalid(format!("{ENV_BIND_ADDR} must be a host:port socket address"))
            })?;

        let page_size = value_or_default(&lookup, ENV_PAGE_SIZE, DEFAULT_PAGE_SIZE)
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::Invalid(format!(
                    "{ENV_PAGE_SIZE} must be an integer in [1, {MAX_PAGE_SIZE}]"
                ))
            })?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::Invalid(format!(
                "{ENV_PAGE_SIZE} must be in [1, {MAX_PAGE_SIZE}]"
            )));
        }

        Ok(Self {
            bind_addr,
            page_size,
        })
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
