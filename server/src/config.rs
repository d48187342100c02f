//! Server configuration from the environment.
//!
//! `main` loads `.env` (via `dotenvy`) before calling [`ServerConfig::from_env`],
//! so every value here can come from either the process environment or that
//! file. Only `DATABASE_URL` is required.

use std::str::FromStr;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Lifetime of a bearer token issued at login.
    pub session_ttl_days: i64,
    /// Allowed CORS origin; `None` allows any origin.
    pub cors_allow_origin: Option<String>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is unset and
    /// [`ConfigError::Invalid`] when a numeric variable does not parse or
    /// is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env_string("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let session_ttl_days = env_parse("SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS)?;
        if session_ttl_days <= 0 {
            return Err(ConfigError::Invalid { key: "SESSION_TTL_DAYS", value: session_ttl_days.to_string() });
        }

        Ok(Self {
            database_url,
            port: env_parse("PORT", DEFAULT_PORT)?,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            session_ttl_days,
            cors_allow_origin: env_string("CORS_ALLOW_ORIGIN").filter(|v| v != "*"),
        })
    }
}

/// Non-empty, trimmed value of `key`.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse `key`, falling back to `default` when unset. A set but unparseable
/// value is an error rather than a silent default.
pub(crate) fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match env_string(key) {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
