/// Error types for monitoring data
use thiserror::Error;

/// Main error type for reading monitoring records
#[derive(Error, Debug)]
pub enum WqxError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),
}

impl From<phyco_utils::error::DateError> for WqxError {
    fn from(err: phyco_utils::error::DateError) -> Self {
        WqxError::DateParse(err.0)
    }
}

/// Type alias for Results using WqxError
pub type Result<T> = std::result::Result<T, WqxError>;
