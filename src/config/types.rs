//! Runtime configuration types.

use crate::pagination::DEFAULT_PAGE_SIZE;
use std::net::SocketAddr;

/// Which store backs the riddle resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(crate::error::ConfigError::InvalidValue {
                key: "RIDDLE_STORAGE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub storage: StorageBackend,
    /// Schema holding the riddle table. Must be a valid PostgreSQL identifier.
    pub schema: String,
    pub bind_addr: SocketAddr,
    /// Prefix for alert headers (`X-{app_name}-alert`).
    pub app_name: String,
    pub max_connections: u32,
    pub default_page_size: u32,
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: "postgres://localhost/riddle".into(),
            storage: StorageBackend::Postgres,
            schema: "public".into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            app_name: "riddleApp".into(),
            max_connections: 5,
            default_page_size: DEFAULT_PAGE_SIZE,
            body_limit: 64 * 1024,
        }
    }
}
