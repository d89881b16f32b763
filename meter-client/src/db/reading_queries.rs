use anyhow::Result;
use sqlx::SqlitePool;

use crate::domain::{NewReading, Reading};

pub async fn insert_reading(pool: &SqlitePool, reading: &NewReading) -> Result<Reading> {
    let row = sqlx::query_as::<_, Reading>(
        r#"
        INSERT INTO readings (date, kwh_used)
        VALUES (?, ?)
        RETURNING id, date, kwh_used
        "#,
    )
    .bind(reading.date)
    .bind(reading.kwh_used)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Every reading ever stored, oldest date first.
///
/// Readings sharing a date keep the order they were created in.
pub async fn readings_by_date(pool: &SqlitePool) -> Result<Vec<Reading>> {
    let rows = sqlx::query_as::<_, Reading>(
        r#"
        SELECT
            id,
            date,
            kwh_used
        FROM readings
        ORDER BY date, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn count_readings(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM readings")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
