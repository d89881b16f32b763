use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};

use crate::{
    acceptance::{self, blank_forms, Submission},
    chart::ChartRenderer,
    dashboard,
    error::AppError,
    store::RecordStore,
};

pub mod views;

pub const DASHBOARD_PATH: &str = "/dashboard/";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub renderer: Arc<dyn ChartRenderer>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self { store, renderer }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(input_form).post(submit_form))
        .route(DASHBOARD_PATH, get(show_dashboard))
        .route("/dashboard", get(|| async { Redirect::permanent(DASHBOARD_PATH) }))
        .with_state(state)
}

async fn input_form() -> Html<String> {
    Html(views::input_page(&blank_forms()))
}

/// Save what validates, drop what doesn't, and always go to the dashboard.
async fn submit_form(
    State(state): State<AppState>,
    Form(submission): Form<Submission>,
) -> Result<Redirect, AppError> {
    metrics::counter!("http_submissions_total").increment(1);

    let outcome = acceptance::submit(state.store.as_ref(), &submission).await?;
    tracing::debug!(
        reading_saved = outcome.reading.is_saved(),
        tariff_saved = outcome.tariff.is_saved(),
        "submission handled"
    );

    Ok(Redirect::to(DASHBOARD_PATH))
}

async fn show_dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let dashboard = dashboard::compute_dashboard(state.store.as_ref(), state.renderer.clone()).await?;
    Ok(Html(views::dashboard_page(&dashboard)))
}
