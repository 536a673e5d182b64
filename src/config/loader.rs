//! Configuration loading from the process environment.
//!
//! # Responsibilities
//! - Read store credentials and listener settings from env vars
//! - Apply defaults for everything optional
//! - Fail startup with a precise error for missing/invalid values
//!
//! # Design Decisions
//! - The loader is parameterized over a lookup function so tests can
//!   feed it a map instead of mutating process-global env state

use std::env;

use crate::config::schema::{GatewayConfig, StoreConfig, TimeoutConfig};

/// Environment variables consumed at startup.
const DB_HOST: &str = "DB_HOST";
const DB_USER: &str = "DB_USER";
const DB_PASS: &str = "DB_PASS";
const DB_NAME: &str = "DB_NAME";
const BIND_ADDR: &str = "BIND_ADDR";
const STORE_FETCH_TIMEOUT_SECS: &str = "STORE_FETCH_TIMEOUT_SECS";
const SSH_CONNECT_TIMEOUT_SECS: &str = "SSH_CONNECT_TIMEOUT_SECS";
const SSH_COMMAND_TIMEOUT_SECS: &str = "SSH_COMMAND_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but does not parse.
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    load_with(|name| env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
pub fn load_with<F>(lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let required = |name: &'static str| -> Result<String, ConfigError> {
        match lookup(name) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(ConfigError::Missing(name)),
        }
    };

    let secs = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
        match lookup(name) {
            None => Ok(default),
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                name,
                value: v.clone(),
            }),
        }
    };

    let store = StoreConfig {
        host: required(DB_HOST)?,
        user: required(DB_USER)?,
        password: required(DB_PASS)?,
        database: required(DB_NAME)?,
    };

    let defaults = TimeoutConfig::default();
    let timeouts = TimeoutConfig {
        store_fetch_secs: secs(STORE_FETCH_TIMEOUT_SECS, defaults.store_fetch_secs)?,
        ssh_connect_secs: secs(SSH_CONNECT_TIMEOUT_SECS, defaults.ssh_connect_secs)?,
        ssh_command_secs: secs(SSH_COMMAND_TIMEOUT_SECS, defaults.ssh_command_secs)?,
    };

    Ok(GatewayConfig {
        bind_address: lookup(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        store,
        timeouts,
    })
}
