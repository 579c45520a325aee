//! Apply DDL for the riddle table: schema first, then the table.

use crate::error::AppError;
use crate::sql::{qualified_table, quoted, RIDDLE_TABLE};
use sqlx::PgPool;

struct ColumnDef {
    name: &'static str,
    pg_type: &'static str,
    nullable: bool,
}

const RIDDLE_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "id",
        pg_type: "BIGSERIAL",
        nullable: false,
    },
    ColumnDef {
        name: "name",
        pg_type: "TEXT",
        nullable: false,
    },
];

fn create_table_sql(schema: &str) -> String {
    let mut col_defs: Vec<String> = RIDDLE_COLUMNS
        .iter()
        .map(|c| {
            let mut def = format!("{} {}", quoted(c.name), c.pg_type);
            if !c.nullable {
                def.push_str(" NOT NULL");
            }
            def
        })
        .collect();
    col_defs.push(format!("PRIMARY KEY ({})", quoted("id")));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        qualified_table(schema, RIDDLE_TABLE),
        col_defs.join(",\n  ")
    )
}

/// CREATE SCHEMA and CREATE TABLE, both IF NOT EXISTS, so this is safe on every start.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;
    let ddl = create_table_sql(schema);
    tracing::debug!(sql = %ddl, "migration");
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(schema, table = RIDDLE_TABLE, "riddle table ready");
    Ok(())
}
