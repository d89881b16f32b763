use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub mod reading_queries;
pub mod tariff_queries;

pub use reading_queries::{count_readings, insert_reading, readings_by_date};
pub use tariff_queries::{insert_tariff, latest_tariff};

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS readings (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        date     TEXT    NOT NULL,
        kwh_used REAL    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tariffs (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        price_per_kwh INTEGER NOT NULL
    )
    "#,
];

/// Open a pool for `uri` and make sure both tables exist.
///
/// An in-memory database lives and dies with its connection, so such pools are
/// pinned to a single connection that never expires.
pub async fn connect(uri: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(uri)?.create_if_missing(true);
    let max_connections = if uri.contains(":memory:") { 1 } else { max_connections };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    apply_schema(&pool).await?;
    Ok(pool)
}

pub async fn connect_in_memory() -> Result<SqlitePool> {
    connect("sqlite::memory:", 1).await
}

pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
