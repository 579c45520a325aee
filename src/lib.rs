//! Riddle API: CRUD REST resource for riddles backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{AppConfig, StorageBackend};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Riddle, RiddleDto};
pub use pagination::{Page, PageRequest};
pub use routes::{app, common_routes, riddle_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryRiddleStore, PgRiddleStore, RiddleStore};
