use crate::{characteristic::Characteristic, error::Result, station_date::StationDate, WqxError};
use csv::{ReaderBuilder, Trim};
use log::warn;
use phyco_utils::{dates::parse_activity_date, missing::parse_value};
use serde::Deserialize;
use std::io::Read;

/// Columns a long-format monitoring export must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "MonitoringLocationID",
    "MonitoringLocationName",
    "MonitoringLocationLatitude",
    "MonitoringLocationLongitude",
    "ActivityStartDate",
    "CharacteristicName",
    "ResultValue",
];

/// A single long-format monitoring row: one characteristic measured at one
/// location on one activity date.
///
/// Values are held as source text; [`MonitoringRecord::value`] and
/// [`MonitoringRecord::station_date`] interpret them. Columns other than the
/// ones below are ignored on read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitoringRecord {
    #[serde(rename = "MonitoringLocationID")]
    pub location_id: String,
    #[serde(rename = "MonitoringLocationName")]
    pub location_name: String,
    #[serde(rename = "MonitoringLocationLatitude")]
    pub latitude: String,
    #[serde(rename = "MonitoringLocationLongitude")]
    pub longitude: String,
    #[serde(rename = "ActivityStartDate")]
    pub activity_start_date: String,
    #[serde(rename = "CharacteristicName")]
    pub characteristic_name: String,
    #[serde(rename = "ResultValue", default)]
    pub result_value: String,
    #[serde(rename = "ResultUnit", default)]
    pub result_unit: String,
}

impl MonitoringRecord {
    /// Read monitoring records from a CSV source with a header row.
    ///
    /// Fails if a required column is missing. Rows that cannot be decoded
    /// (short rows, bad quoting) are logged and skipped.
    pub fn read_csv<R: Read>(reader: R) -> Result<Vec<MonitoringRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(WqxError::MissingColumn(column.to_string()));
            }
        }

        let mut records = Vec::new();
        let mut skipped = 0u32;
        for (row, result) in rdr.deserialize::<MonitoringRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    // row 0 is the first data line, line 2 of the file
                    warn!("Skipping monitoring row {}: {}", row + 2, e);
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            warn!("Skipped {} undecodable monitoring rows", skipped);
        }
        Ok(records)
    }

    /// Parse a CSV string of monitoring records.
    pub fn parse_monitoring_csv(csv_object: &str) -> Result<Vec<MonitoringRecord>> {
        MonitoringRecord::read_csv(csv_object.as_bytes())
    }

    /// Canonical characteristic for this row, if its name is a recognised variant.
    pub fn canonical(&self) -> Option<Characteristic> {
        Characteristic::from_source_name(&self.characteristic_name)
    }

    /// Numeric result, or `None` when the result is missing or not a number.
    pub fn value(&self) -> Option<f64> {
        parse_value(&self.result_value)
    }

    /// The station-date key this reading belongs to.
    pub fn station_date(&self) -> Result<StationDate> {
        let date = parse_activity_date(&self.activity_start_date)?;
        Ok(StationDate::new(
            &self.location_id,
            &self.location_name,
            &self.latitude,
            &self.longitude,
            date,
        ))
    }
}
