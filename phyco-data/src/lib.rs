//! Data processing for water-quality monitoring tables.
//!
//! This crate turns raw monitoring exports into forms suitable for
//! model training: the long-to-wide algae feature pivot, and a generic
//! cleaner for instrument CSVs that carry a units row.

pub mod clean;
pub mod pivot;
