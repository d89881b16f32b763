use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::chart::ChartError;

/// Failures that abort a request. Validation problems never get here.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] anyhow::Error),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        metrics::counter!("http_requests_failed_total").increment(1);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
