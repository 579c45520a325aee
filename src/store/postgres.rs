//! PostgreSQL-backed riddle store and database bootstrap.

use super::RiddleStore;
use crate::error::AppError;
use crate::model::Riddle;
use crate::pagination::{Page, PageRequest};
use crate::sql;
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgRiddleStore {
    pool: PgPool,
    schema: String,
}

impl PgRiddleStore {
    /// `schema` must already hold the riddle table (see `apply_migrations`).
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgRiddleStore {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RiddleStore for PgRiddleStore {
    async fn insert(&self, name: &str) -> Result<Riddle, AppError> {
        let q = sql::insert(&self.schema);
        tracing::debug!(sql = %q, "query");
        let row = sqlx::query_as::<_, Riddle>(&q)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn replace(&self, riddle: &Riddle) -> Result<Option<Riddle>, AppError> {
        let Some(id) = riddle.id else {
            return Ok(None);
        };
        let q = sql::update(&self.schema);
        tracing::debug!(sql = %q, id, "query");
        let row = sqlx::query_as::<_, Riddle>(&q)
            .bind(&riddle.name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Riddle>, AppError> {
        let q = sql::select_by_id(&self.schema);
        tracing::debug!(sql = %q, id, "query");
        let row = sqlx::query_as::<_, Riddle>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Riddle>, AppError> {
        let q = sql::select_page(&self.schema, &request.sort);
        tracing::debug!(sql = %q, page = request.page, size = request.size, "query");
        let offset = i64::try_from(request.offset())
            .map_err(|_| AppError::BadRequest("page offset out of range".into()))?;
        let content = sqlx::query_as::<_, Riddle>(&q)
            .bind(request.size as i64)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let total = self.count().await?;
        Ok(Page {
            content,
            total,
            request: request.clone(),
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let q = sql::delete(&self.schema);
        tracing::debug!(sql = %q, id, "query");
        let result = sqlx::query(&q).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, AppError> {
        let (n,): (i64,) = sqlx::query_as(&sql::count(&self.schema))
            .fetch_one(&self.pool)
            .await?;
        Ok(n.max(0) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut split = path_and_query.splitn(2, '?');
    let db_name = split.next().unwrap_or("").trim().to_string();
    let query = split.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name))
}
