//! Config validation: identifiers that end up in SQL or header names.

use super::AppConfig;
use crate::error::ConfigError;
use regex::Regex;

const PG_IDENTIFIER: &str = r"^[A-Za-z_][A-Za-z0-9_]{0,62}$";
const APP_NAME: &str = r"^[A-Za-z][A-Za-z0-9]*$";

fn matches(pattern: &str, value: &str) -> Result<bool, ConfigError> {
    let re = Regex::new(pattern).map_err(|e| ConfigError::Load(e.to_string()))?;
    Ok(re.is_match(value))
}

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if !matches(PG_IDENTIFIER, &config.schema)? {
        return Err(ConfigError::InvalidIdentifier {
            key: super::ENV_SCHEMA,
            value: config.schema.clone(),
        });
    }
    if !matches(APP_NAME, &config.app_name)? {
        return Err(ConfigError::InvalidIdentifier {
            key: super::ENV_APP_NAME,
            value: config.app_name.clone(),
        });
    }
    if config.default_page_size == 0 {
        return Err(ConfigError::InvalidValue {
            key: super::ENV_DEFAULT_PAGE_SIZE,
            value: "0".into(),
        });
    }
    if config.max_connections == 0 {
        return Err(ConfigError::InvalidValue {
            key: super::ENV_MAX_CONNECTIONS,
            value: "0".into(),
        });
    }
    Ok(())
}
