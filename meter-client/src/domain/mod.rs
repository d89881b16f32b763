pub mod reading;
pub mod tariff;

pub use reading::{NewReading, Reading};
pub use tariff::{NewTariff, Tariff};
