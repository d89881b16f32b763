//! Turning a cost series into an image the dashboard can inline.
//!
//! Cost derivation only ever talks to [`ChartRenderer`], so it can be tested
//! with a stub and the plotting backend can be swapped without touching it.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use time::Date;

pub mod svg;

pub use svg::SvgChartRenderer;

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("cannot plot an empty series")]
    EmptySeries,
    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Image bytes, base-64 encoded, tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedChart {
    pub mime: &'static str,
    pub base64: String,
}

impl EncodedChart {
    pub fn encode(mime: &'static str, bytes: &[u8]) -> Self {
        Self {
            mime,
            base64: STANDARD.encode(bytes),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.base64)
    }

    /// Value for an `<img src=...>` attribute.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

/// Renders a line plot of cost against date, one marker per point.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, points: &[(Date, f64)]) -> Result<EncodedChart, ChartError>;
}
