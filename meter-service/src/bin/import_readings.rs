use std::{env, fs::File};

use anyhow::{bail, Context, Result};
use meter_service::{config::AppConfig, import, observability, store::SqliteRecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: import_readings <csv_file_path>");
    }
    let file_path = &args[1];

    // Same config as the web service, so the import lands in the same database.
    let cfg = AppConfig::load()?;

    let store = SqliteRecordStore::connect(&cfg.database.uri, cfg.database.max_connections).await?;

    let file = File::open(file_path).with_context(|| format!("failed to open CSV file '{file_path}'"))?;
    import::import_readings(&store, file).await?;

    Ok(())
}
