use meter_client::domain::{NewReading, NewTariff};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use crate::store::RecordStore;

pub mod forms;

pub use forms::{blank_forms, BlankForms, FieldSpec, FormSpec, InputKind};

/// Accepted date spellings, tried in order. The date picker sends the first.
/// Month and day take one or two digits.
const DATE_FORMATS: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[month padding:none]/[day padding:none]/[year]"),
];

/// Largest price the `tariffs` column is allowed to hold.
pub const MAX_PRICE_PER_KWH: i64 = i32::MAX as i64;

/// One combined form post. Every field is optional and kept as raw text so a
/// bad value only sinks the entity it belongs to.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Submission {
    pub date: Option<String>,
    pub kwh_used: Option<String>,
    pub price_per_kwh: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be {expected}, got '{value}'")]
    Malformed {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}

/// What happened to one entity of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOutcome {
    Saved { id: i64 },
    Rejected(ValidationError),
}

impl EntityOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub reading: EntityOutcome,
    pub tariff: EntityOutcome,
}

fn required<'a>(field: &'static str, raw: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Required { field }),
    }
}

pub fn parse_date(raw: Option<&str>) -> Result<Date, ValidationError> {
    let value = required("date", raw)?;

    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(value, *format).ok())
        .ok_or_else(|| ValidationError::Malformed {
            field: "date",
            expected: "a calendar date",
            value: value.to_string(),
        })
}

pub fn parse_kwh_used(raw: Option<&str>) -> Result<f64, ValidationError> {
    let value = required("kwh_used", raw)?;

    match value.parse::<f64>() {
        Ok(kwh) if kwh.is_finite() => Ok(kwh),
        _ => Err(ValidationError::Malformed {
            field: "kwh_used",
            expected: "a number",
            value: value.to_string(),
        }),
    }
}

/// Whole numbers only, though `15.0` and `15.` are read as 15.
pub fn parse_price_per_kwh(raw: Option<&str>) -> Result<i64, ValidationError> {
    let value = required("price_per_kwh", raw)?;

    let integral = match value.rfind('.') {
        Some(idx) if value[idx + 1..].bytes().all(|b| b == b'0') => &value[..idx],
        _ => value,
    };

    let price: i64 = integral.parse().map_err(|_| ValidationError::Malformed {
        field: "price_per_kwh",
        expected: "a whole number",
        value: value.to_string(),
    })?;

    if !(0..=MAX_PRICE_PER_KWH).contains(&price) {
        return Err(ValidationError::OutOfRange {
            field: "price_per_kwh",
            min: 0,
            max: MAX_PRICE_PER_KWH,
            value: price,
        });
    }

    Ok(price)
}

pub fn parse_reading(submission: &Submission) -> Result<NewReading, ValidationError> {
    let date = parse_date(submission.date.as_deref())?;
    let kwh_used = parse_kwh_used(submission.kwh_used.as_deref())?;
    Ok(NewReading { date, kwh_used })
}

pub fn parse_tariff(submission: &Submission) -> Result<NewTariff, ValidationError> {
    let price_per_kwh = parse_price_per_kwh(submission.price_per_kwh.as_deref())?;
    Ok(NewTariff { price_per_kwh })
}

/// Persist whichever of the reading and the tariff validate.
///
/// The two entities are independent: one may be saved while the other is
/// rejected. Only storage failures are returned as errors.
pub async fn submit(store: &dyn RecordStore, submission: &Submission) -> anyhow::Result<SubmitOutcome> {
    let reading = match parse_reading(submission) {
        Ok(new) => {
            let saved = store.insert_reading(&new).await?;
            metrics::counter!("reading_submissions_accepted_total").increment(1);
            tracing::info!(id = saved.id, date = %saved.date, kwh_used = saved.kwh_used, "reading saved");
            EntityOutcome::Saved { id: saved.id }
        }
        Err(e) => {
            metrics::counter!("reading_submissions_rejected_total").increment(1);
            tracing::warn!(error = %e, "reading rejected");
            EntityOutcome::Rejected(e)
        }
    };

    let tariff = match parse_tariff(submission) {
        Ok(new) => {
            let saved = store.insert_tariff(&new).await?;
            metrics::counter!("tariff_submissions_accepted_total").increment(1);
            tracing::info!(id = saved.id, price_per_kwh = saved.price_per_kwh, "tariff saved");
            EntityOutcome::Saved { id: saved.id }
        }
        Err(e) => {
            metrics::counter!("tariff_submissions_rejected_total").increment(1);
            tracing::warn!(error = %e, "tariff rejected");
            EntityOutcome::Rejected(e)
        }
    };

    Ok(SubmitOutcome { reading, tariff })
}
