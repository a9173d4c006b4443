//! Core types for water-quality monitoring data.
//!
//! Source data arrives in long (tidy) form: one row per station, activity
//! date and measured characteristic. This crate knows how to read those rows,
//! fold the many source naming conventions onto six canonical
//! characteristics, and key readings by station and date.

pub mod characteristic;
pub mod error;
pub mod record;
pub mod station_date;

pub use characteristic::Characteristic;
pub use error::{Result, WqxError};
pub use record::MonitoringRecord;
pub use station_date::StationDate;
