pub mod acceptance;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod import;
pub mod metrics_server;
pub mod observability;
pub mod store;
pub mod web;

pub use store::{RecordStore, SqliteRecordStore};
pub use web::{router, AppState};
