//! Riddle API server: loads config from env (and `.env`), prepares storage, serves the router.
//!
//! Run from repo root: `cargo run -p riddle-server`
//! Without PostgreSQL: `RIDDLE_STORAGE=memory cargo run -p riddle-server`

use riddle_api::{
    app, apply_migrations, ensure_database_exists, telemetry, AppConfig, AppState, MemoryRiddleStore, PgRiddleStore,
    RiddleStore, StorageBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    telemetry::init("riddle_api=info,riddle_server=info,tower_http=info");

    let store: Arc<dyn RiddleStore> = match config.storage {
        StorageBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            apply_migrations(&pool, &config.schema).await?;
            Arc::new(PgRiddleStore::new(pool, config.schema.clone()))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; riddles are lost on restart");
            Arc::new(MemoryRiddleStore::new())
        }
    };

    let bind_addr = config.bind_addr;
    let router = app(AppState::new(store, config));
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
