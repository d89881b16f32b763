use std::sync::Arc;

use meter_client::domain::{Reading, Tariff};
use time::Date;

use crate::{
    chart::{ChartError, ChartRenderer, EncodedChart},
    error::AppError,
    store::RecordStore,
};

/// Three parallel sequences, one entry per reading, in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostSeries {
    pub dates: Vec<Date>,
    pub kwh: Vec<f64>,
    /// `kwh * price_per_kwh`, in the tariff's minor unit.
    pub costs: Vec<f64>,
}

impl CostSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// `(date, cost)` pairs, the input the chart is drawn from.
    pub fn points(&self) -> Vec<(Date, f64)> {
        self.dates.iter().copied().zip(self.costs.iter().copied()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub chart: EncodedChart,
    pub readings: Vec<Reading>,
    pub tariff: Tariff,
    pub series: CostSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    /// No readings, or no tariff yet.
    NoData,
    Ready(DashboardData),
}

/// Price every reading at the given tariff, keeping the readings' order.
pub fn derive_costs(readings: &[Reading], tariff: &Tariff) -> CostSeries {
    let price = tariff.price_per_kwh as f64;
    let mut series = CostSeries {
        dates: Vec::with_capacity(readings.len()),
        kwh: Vec::with_capacity(readings.len()),
        costs: Vec::with_capacity(readings.len()),
    };

    for reading in readings {
        series.dates.push(reading.date);
        series.kwh.push(reading.kwh_used);
        series.costs.push(reading.kwh_used * price);
    }

    series
}

/// Build the dashboard from everything in the store.
///
/// All readings are priced at the newest tariff, whatever their date.
/// Drawing is CPU-bound and runs on the blocking pool.
pub async fn compute_dashboard(
    store: &dyn RecordStore,
    renderer: Arc<dyn ChartRenderer>,
) -> Result<Dashboard, AppError> {
    let readings = store.readings_by_date().await?;
    let tariff = store.latest_tariff().await?;

    let tariff = match tariff {
        Some(t) if !readings.is_empty() => t,
        _ => {
            metrics::counter!("dashboard_no_data_total").increment(1);
            tracing::info!(readings = readings.len(), "dashboard has no data to show");
            return Ok(Dashboard::NoData);
        }
    };

    let series = derive_costs(&readings, &tariff);
    let points = series.points();
    let chart = tokio::task::spawn_blocking(move || renderer.render(&points))
        .await
        .map_err(|e| ChartError::Render(format!("render task failed: {e}")))??;

    metrics::counter!("dashboard_renders_total").increment(1);
    tracing::debug!(points = series.len(), price_per_kwh = tariff.price_per_kwh, "dashboard rendered");

    Ok(Dashboard::Ready(DashboardData {
        chart,
        readings,
        tariff,
        series,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::store::SqliteRecordStore;
    use meter_client::domain::{NewReading, NewTariff};
    use time::macros::date;

    /// Records what it was asked to draw instead of drawing it.
    #[derive(Default)]
    struct RecordingRenderer {
        seen: Mutex<Vec<Vec<(Date, f64)>>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&self, points: &[(Date, f64)]) -> Result<EncodedChart, ChartError> {
            self.seen.lock().unwrap().push(points.to_vec());
            Ok(EncodedChart::encode("image/png", b"png"))
        }
    }

    fn recording() -> Arc<dyn ChartRenderer> {
        Arc::new(RecordingRenderer::default())
    }

    fn reading(id: i64, date: Date, kwh_used: f64) -> Reading {
        Reading { id, date, kwh_used }
    }

    async fn add_reading(store: &SqliteRecordStore, date: Date, kwh_used: f64) {
        store.insert_reading(&NewReading { date, kwh_used }).await.unwrap();
    }

    async fn add_tariff(store: &SqliteRecordStore, price_per_kwh: i64) {
        store.insert_tariff(&NewTariff { price_per_kwh }).await.unwrap();
    }

    #[test]
    fn derive_costs_multiplies_each_reading_by_the_price() {
        let readings = [
            reading(1, date!(2024-01-01), 10.0),
            reading(2, date!(2024-01-02), 2.5),
        ];
        let tariff = Tariff { id: 1, price_per_kwh: 15 };

        let series = derive_costs(&readings, &tariff);

        assert_eq!(series.dates, vec![date!(2024-01-01), date!(2024-01-02)]);
        assert_eq!(series.kwh, vec![10.0, 2.5]);
        assert_eq!(series.costs, vec![150.0, 37.5]);
        assert_eq!(series.points(), vec![(date!(2024-01-01), 150.0), (date!(2024-01-02), 37.5)]);
    }

    #[test]
    fn derive_costs_on_no_readings_is_empty() {
        let series = derive_costs(&[], &Tariff { id: 1, price_per_kwh: 15 });
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }

    #[tokio::test]
    async fn empty_store_has_no_data_and_draws_nothing() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        let renderer = Arc::new(RecordingRenderer::default());

        let dashboard = compute_dashboard(&store, renderer.clone()).await.unwrap();

        assert_eq!(dashboard, Dashboard::NoData);
        assert!(renderer.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn readings_without_tariff_have_no_data() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        add_reading(&store, date!(2024-01-01), 10.0).await;

        let dashboard = compute_dashboard(&store, recording()).await.unwrap();
        assert_eq!(dashboard, Dashboard::NoData);
    }

    #[tokio::test]
    async fn tariff_without_readings_has_no_data() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        add_tariff(&store, 15).await;

        let dashboard = compute_dashboard(&store, recording()).await.unwrap();
        assert_eq!(dashboard, Dashboard::NoData);
    }

    #[tokio::test]
    async fn single_reading_priced_at_current_tariff() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        add_reading(&store, date!(2024-01-01), 10.0).await;
        add_tariff(&store, 15).await;
        let renderer = Arc::new(RecordingRenderer::default());

        let Dashboard::Ready(data) = compute_dashboard(&store, renderer.clone()).await.unwrap() else {
            panic!("expected a populated dashboard");
        };

        assert_eq!(data.readings.len(), 1);
        assert_eq!(data.tariff.price_per_kwh, 15);
        assert_eq!(data.series.points(), vec![(date!(2024-01-01), 150.0)]);
        assert_eq!(*renderer.seen.lock().unwrap(), vec![vec![(date!(2024-01-01), 150.0)]]);
    }

    #[tokio::test]
    async fn newest_tariff_wins() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        add_tariff(&store, 10).await;
        add_tariff(&store, 20).await;
        add_reading(&store, date!(2024-02-01), 5.0).await;

        let Dashboard::Ready(data) = compute_dashboard(&store, recording()).await.unwrap() else {
            panic!("expected a populated dashboard");
        };

        assert_eq!(data.tariff.price_per_kwh, 20);
        assert_eq!(data.series.costs, vec![100.0]);
    }

    #[tokio::test]
    async fn series_is_sorted_by_date_not_submission_order() {
        let store = SqliteRecordStore::in_memory().await.unwrap();
        add_reading(&store, date!(2024-03-10), 3.0).await;
        add_reading(&store, date!(2024-01-20), 1.0).await;
        add_reading(&store, date!(2024-02-15), 2.0).await;
        add_tariff(&store, 10).await;

        let Dashboard::Ready(data) = compute_dashboard(&store, recording()).await.unwrap() else {
            panic!("expected a populated dashboard");
        };

        assert_eq!(
            data.series.dates,
            vec![date!(2024-01-20), date!(2024-02-15), date!(2024-03-10)]
        );
        assert_eq!(data.series.costs, vec![10.0, 20.0, 30.0]);
        assert_eq!(
            data.readings.iter().map(|r| r.date).collect::<Vec<_>>(),
            data.series.dates
        );
    }

    #[tokio::test]
    async fn renderer_failure_propagates() {
        struct Broken;
        impl ChartRenderer for Broken {
            fn render(&self, _: &[(Date, f64)]) -> Result<EncodedChart, ChartError> {
                Err(ChartError::Render("backend unavailable".to_string()))
            }
        }

        let store = SqliteRecordStore::in_memory().await.unwrap();
        add_reading(&store, date!(2024-01-01), 1.0).await;
        add_tariff(&store, 1).await;

        let res = compute_dashboard(&store, Arc::new(Broken)).await;
        assert!(matches!(res, Err(AppError::Chart(ChartError::Render(_)))));
    }
}
