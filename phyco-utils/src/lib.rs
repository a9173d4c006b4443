//! Shared utility functions for phyco crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::NaiveDate;

    /// Formats accepted for activity dates, tried in order.
    const ACTIVITY_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%Y/%m/%d"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a monitoring activity date.
    ///
    /// Any time-of-day suffix (`2021-07-14T10:30:00`, `2021-07-14 10:30`)
    /// is discarded; readings are keyed by calendar date only.
    pub fn parse_activity_date(s: &str) -> Result<NaiveDate, DateError> {
        let trimmed = s.trim();
        let date_part = trimmed
            .split(|c: char| c == 'T' || c.is_whitespace())
            .next()
            .unwrap_or("");
        ACTIVITY_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
            .ok_or_else(|| DateError(format!("unrecognised activity date '{}'", trimmed)))
    }

}

/// Missing-value markers shared by the CSV tools.
pub mod missing {
    /// Tokens read as "no value", in addition to the empty string.
    ///
    /// Matches the markers common spreadsheet and dataframe exports emit.
    pub const MISSING_MARKERS: [&str; 18] = [
        "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
        "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ];

    /// Whether a raw CSV field holds no value.
    ///
    /// Matching is exact: padded markers such as `" NA "` are data.
    pub fn is_missing(field: &str) -> bool {
        field.is_empty() || MISSING_MARKERS.contains(&field)
    }

    /// Parse a numeric field, mapping missing markers and non-numeric text to `None`.
    pub fn parse_value(field: &str) -> Option<f64> {
        if is_missing(field) {
            return None;
        }
        field.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
    }

}

/// File input helpers
pub mod io {
    use anyhow::Context;
    use flate2::read::GzDecoder;
    use std::fs::File;
    use std::io::{BufReader, Read};
    use std::path::Path;

    /// Open a data file for reading, decompressing it when the name ends in `.gz`.
    pub fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
        let file = File::open(path)
            .with_context(|| format!("failed to open input file {}", path.display()))?;
        let reader = BufReader::new(file);
        if path.extension().is_some_and(|ext| ext == "gz") {
            log::info!("Decompressing gzip input {}", path.display());
            Ok(Box::new(GzDecoder::new(reader)))
        } else {
            Ok(Box::new(reader))
        }
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
