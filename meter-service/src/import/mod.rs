use std::io::Read;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::{
    acceptance::{self, ValidationError},
    store::RecordStore,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

struct Columns {
    date: usize,
    kwh_used: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| anyhow!("missing column '{name}' in CSV header"))
        };

        Ok(Self {
            date: position("date")?,
            kwh_used: position("kwh_used")?,
        })
    }

    fn submission(&self, record: &StringRecord) -> acceptance::Submission {
        acceptance::Submission {
            date: record.get(self.date).map(str::to_string),
            kwh_used: record.get(self.kwh_used).map(str::to_string),
            price_per_kwh: None,
        }
    }
}

/// CSV import of readings.
///
/// Expected header columns (by name, any order, extra columns ignored):
/// - date (same spellings the web form accepts)
/// - kwh_used
///
/// Rows go through the same validation as the form; bad rows are skipped.
pub async fn import_readings<R: Read>(store: &dyn RecordStore, input: R) -> Result<ImportSummary> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = rdr.headers().context("failed to read CSV headers")?.clone();
    let columns = Columns::locate(&headers)?;

    let mut summary = ImportSummary::default();

    for (idx, result) in rdr.records().enumerate() {
        let record = result.context("failed to read CSV record")?;
        // Header is line 1.
        let line = idx + 2;

        match acceptance::parse_reading(&columns.submission(&record)) {
            Ok(reading) => {
                store.insert_reading(&reading).await?;
                summary.imported += 1;
            }
            Err(e) => {
                log_skipped(line, &e);
                metrics::counter!("reading_import_rejected_total").increment(1);
                summary.skipped += 1;
            }
        }
    }

    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "reading import finished"
    );

    Ok(summary)
}

fn log_skipped(line: usize, error: &ValidationError) {
    tracing::warn!(line, error = %error, "skipping CSV row");
}
