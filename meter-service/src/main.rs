use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use meter_service::{
    chart::SvgChartRenderer,
    config::AppConfig,
    metrics_server, observability,
    store::SqliteRecordStore,
    web::{router, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let store = SqliteRecordStore::connect(&cfg.database.uri, cfg.database.max_connections).await?;
    let renderer = SvgChartRenderer::new(&cfg.chart);
    let app = router(AppState::new(Arc::new(store), Arc::new(renderer)));

    let addr: SocketAddr = cfg
        .http
        .bind_addr
        .parse()
        .with_context(|| format!("invalid http.bind_addr '{}'", cfg.http.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, database = %cfg.database.uri, "meter service listening");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
