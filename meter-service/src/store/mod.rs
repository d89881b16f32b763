use meter_client::{
    db,
    domain::{NewReading, NewTariff, Reading, Tariff},
};
use sqlx::SqlitePool;

/// Durable, append-only storage for readings and tariffs.
///
/// Nothing here is updated or deleted; the only reads are a full scan of
/// readings by date and a lookup of the newest tariff.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_reading(&self, reading: &NewReading) -> anyhow::Result<Reading>;

    async fn readings_by_date(&self) -> anyhow::Result<Vec<Reading>>;

    async fn insert_tariff(&self, tariff: &NewTariff) -> anyhow::Result<Tariff>;

    async fn latest_tariff(&self) -> anyhow::Result<Option<Tariff>>;
}

#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(uri: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = db::connect(uri, max_connections).await?;
        Ok(Self::new(pool))
    }

    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = db::connect_in_memory().await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert_reading(&self, reading: &NewReading) -> anyhow::Result<Reading> {
        db::insert_reading(&self.pool, reading).await
    }

    async fn readings_by_date(&self) -> anyhow::Result<Vec<Reading>> {
        db::readings_by_date(&self.pool).await
    }

    async fn insert_tariff(&self, tariff: &NewTariff) -> anyhow::Result<Tariff> {
        db::insert_tariff(&self.pool, tariff).await
    }

    async fn latest_tariff(&self) -> anyhow::Result<Option<Tariff>> {
        db::latest_tariff(&self.pool).await
    }
}
