//! Generic cleaner for instrument CSV exports.
//!
//! Exports such as CTD profiles carry a second header row holding units.
//! The cleaner drops that row and every record with a missing value, and
//! writes the remaining records with their fields untouched.

use csv::{ReaderBuilder, WriterBuilder};
use log::warn;
use phyco_utils::missing::is_missing;
use std::io::{Read, Write};

/// Row counts from a cleaning pass. The units row is not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanSummary {
    pub original_rows: usize,
    pub kept_rows: usize,
}

impl CleanSummary {
    pub fn dropped_rows(&self) -> usize {
        self.original_rows - self.kept_rows
    }
}

/// Clean a CSV stream: keep the header, skip the units row, drop incomplete records.
///
/// A record is incomplete when any field is missing (see
/// [`phyco_utils::missing::is_missing`]) or when it has fewer fields than
/// the header. Records with more fields than the header are dropped too.
pub fn clean_csv<R: Read, W: Write>(reader: R, writer: W) -> Result<CleanSummary, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut wtr = WriterBuilder::new().from_writer(writer);
    let mut summary = CleanSummary::default();

    let mut records = rdr.records();
    let header = match records.next() {
        Some(header) => header?,
        None => return Ok(summary),
    };
    wtr.write_record(&header)?;

    // second line holds units
    if let Some(units) = records.next() {
        units?;
    }

    for result in records {
        let record = result?;
        summary.original_rows += 1;
        if record.len() > header.len() {
            warn!(
                "Dropping record with {} fields (header has {})",
                record.len(),
                header.len()
            );
            continue;
        }
        if record.len() < header.len() || record.iter().any(is_missing) {
            continue;
        }
        wtr.write_record(&record)?;
        summary.kept_rows += 1;
    }
    wtr.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../fixtures/ctd_profile_sample.csv");

    fn clean_str(input: &str) -> (CleanSummary, String) {
        let mut out = Vec::new();
        let summary = clean_csv(input.as_bytes(), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_clean_ctd_profile() {
        let (summary, output) = clean_str(SAMPLE);
        assert_eq!(summary.original_rows, 6);
        assert_eq!(summary.kept_rows, 3);
        assert_eq!(summary.dropped_rows(), 3);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "station,time,latitude,longitude,depth,temperature,salinity,sigma_t",
                "27,2021-05-04T14:12:00Z,47.55,-52.59,1.0,2.184,31.62,25.07",
                "27,2021-05-04T14:12:00Z,47.55,-52.59,4.0,1.987,31.69,25.14",
                "27,2021-05-04T14:12:00Z,47.55,-52.59,5.0,1.902,31.71,25.16",
            ]
        );
    }

    #[test]
    fn test_units_row_is_never_output() {
        let (_, output) = clean_str(SAMPLE);
        assert!(!output.contains("degrees_north"));
    }

    #[test]
    fn test_header_only_and_empty_input() {
        let (summary, output) = clean_str("a,b\nm,s\n");
        assert_eq!(summary, CleanSummary::default());
        assert_eq!(output, "a,b\n");

        let (summary, output) = clean_str("");
        assert_eq!(summary.original_rows, 0);
        assert_eq!(output, "");
    }

    #[test]
    fn test_overlong_records_dropped() {
        let (summary, output) = clean_str("a,b\nm,s\n1,2\n3,4,5\n");
        assert_eq!(summary.original_rows, 2);
        assert_eq!(summary.kept_rows, 1);
        assert_eq!(output, "a,b\n1,2\n");
    }

    #[test]
    fn test_fields_written_unchanged() {
        let (_, output) = clean_str("name,value\nunit,unit\n\"Bay, North\",0.50\n");
        assert_eq!(output, "name,value\n\"Bay, North\",0.50\n");
    }

    #[test]
    fn test_padded_or_unlisted_markers_are_kept() {
        let (summary, output) = clean_str("a,b\nm,s\n NA ,1\nNAN,2\nnone,3\nNA,4\n");
        assert_eq!(summary.original_rows, 4);
        assert_eq!(summary.kept_rows, 3);
        assert_eq!(output, "a,b\n NA ,1\nNAN,2\nnone,3\n");
    }
}
