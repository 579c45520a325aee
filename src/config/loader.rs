//! Load `AppConfig` from environment variables (optionally seeded from `.env`).

use super::{validate, AppConfig};
use crate::error::ConfigError;
use std::str::FromStr;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_STORAGE: &str = "RIDDLE_STORAGE";
pub const ENV_SCHEMA: &str = "RIDDLE_SCHEMA";
pub const ENV_BIND_ADDR: &str = "RIDDLE_BIND_ADDR";
pub const ENV_APP_NAME: &str = "RIDDLE_APP_NAME";
pub const ENV_MAX_CONNECTIONS: &str = "RIDDLE_DB_MAX_CONNECTIONS";
pub const ENV_DEFAULT_PAGE_SIZE: &str = "RIDDLE_DEFAULT_PAGE_SIZE";
pub const ENV_BODY_LIMIT: &str = "RIDDLE_BODY_LIMIT";

fn parsed<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(s) => match s.trim().parse() {
            Ok(v) => Ok(v),
            Err(_) => Err(ConfigError::InvalidValue { key, value: s }),
        },
    }
}

impl AppConfig {
    /// Read from the process environment after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match lookup(ENV_STORAGE) {
            Some(s) => s.parse()?,
            None => defaults.storage,
        };
        let config = AppConfig {
            database_url: lookup(ENV_DATABASE_URL).unwrap_or(defaults.database_url),
            storage,
            schema: lookup(ENV_SCHEMA).unwrap_or(defaults.schema),
            bind_addr: parsed(ENV_BIND_ADDR, lookup(ENV_BIND_ADDR), defaults.bind_addr)?,
            app_name: lookup(ENV_APP_NAME).unwrap_or(defaults.app_name),
            max_connections: parsed(ENV_MAX_CONNECTIONS, lookup(ENV_MAX_CONNECTIONS), defaults.max_connections)?,
            default_page_size: parsed(ENV_DEFAULT_PAGE_SIZE, lookup(ENV_DEFAULT_PAGE_SIZE), defaults.default_page_size)?,
            body_limit: parsed(ENV_BODY_LIMIT, lookup(ENV_BODY_LIMIT), defaults.body_limit)?,
        };
        validate(&config)?;
        Ok(config)
    }
}
