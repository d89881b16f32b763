use anyhow::Result;
use sqlx::SqlitePool;

use crate::domain::{NewTariff, Tariff};

pub async fn insert_tariff(pool: &SqlitePool, tariff: &NewTariff) -> Result<Tariff> {
    let row = sqlx::query_as::<_, Tariff>(
        r#"
        INSERT INTO tariffs (price_per_kwh)
        VALUES (?)
        RETURNING id, price_per_kwh
        "#,
    )
    .bind(tariff.price_per_kwh)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// The most recently created tariff, regardless of any reading's date.
pub async fn latest_tariff(pool: &SqlitePool) -> Result<Option<Tariff>> {
    let row = sqlx::query_as::<_, Tariff>(
        r#"
        SELECT
            id,
            price_per_kwh
        FROM tariffs
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
