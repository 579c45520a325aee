//! Persistence store for riddles: trait plus PostgreSQL and in-memory backends.

mod memory;
mod postgres;

pub use memory::MemoryRiddleStore;
pub use postgres::{ensure_database_exists, PgRiddleStore};

use crate::error::AppError;
use crate::model::Riddle;
use crate::pagination::{Page, PageRequest};
use async_trait::async_trait;

#[async_trait]
pub trait RiddleStore: Send + Sync {
    /// Insert a new row; the store assigns a fresh id.
    async fn insert(&self, name: &str) -> Result<Riddle, AppError>;

    /// Replace the row with the riddle's id. `None` when no such row exists; never inserts.
    async fn replace(&self, riddle: &Riddle) -> Result<Option<Riddle>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Riddle>, AppError>;

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Riddle>, AppError>;

    /// Remove the row if present. Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    /// Storage health probe used by readiness.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    /// Insert when the riddle has no id, otherwise replace the existing row.
    /// Replacing an unknown id is `NotFound`.
    async fn save(&self, riddle: &Riddle) -> Result<Riddle, AppError> {
        match riddle.id {
            None => self.insert(&riddle.name).await,
            Some(id) => self
                .replace(riddle)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("riddle {}", id))),
        }
    }
}
