//! Long-to-wide reshaping of algae monitoring records.
//!
//! Readings are filtered to the six canonical characteristics, grouped by
//! station and activity date, and spread into one column per
//! characteristic. Chlorophyll is the training target, so rows without it
//! are dropped from every output.

use chrono::NaiveDate;
use csv::WriterBuilder;
use log::{info, warn};
use phyco_utils::dates::format_date;
use phyco_wqx::{Characteristic, MonitoringRecord, StationDate};
use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    io::Write,
    str::FromStr,
};

/// Header of the location/date columns that precede the characteristic columns.
pub const KEY_COLUMNS: [&str; 5] = [
    "MonitoringLocationID",
    "MonitoringLocationName",
    "MonitoringLocationLatitude",
    "MonitoringLocationLongitude",
    "ActivityStartDate",
];

/// How repeated readings of one characteristic at one station and date are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Keep the first reading in file order.
    #[default]
    First,
    /// Keep the last reading in file order.
    Last,
    /// Average all readings.
    Mean,
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Aggregation::First => "first",
            Aggregation::Last => "last",
            Aggregation::Mean => "mean",
        };
        f.write_str(s)
    }
}

impl FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(Aggregation::First),
            "last" => Ok(Aggregation::Last),
            "mean" => Ok(Aggregation::Mean),
            other => Err(format!(
                "unknown aggregation '{}' (expected first, last or mean)",
                other
            )),
        }
    }
}

/// Running state for one (station-date, characteristic) cell.
#[derive(Debug, Clone, Default)]
struct Cell {
    first: Option<f64>,
    last: Option<f64>,
    sum: f64,
    count: u32,
}

impl Cell {
    fn push(&mut self, value: f64) {
        if self.first.is_none() {
            self.first = Some(value);
        }
        self.last = Some(value);
        self.sum += value;
        self.count += 1;
    }

    fn resolve(&self, aggregation: Aggregation) -> Option<f64> {
        match aggregation {
            Aggregation::First => self.first,
            Aggregation::Last => self.last,
            Aggregation::Mean if self.count > 0 => Some(self.sum / self.count as f64),
            Aggregation::Mean => None,
        }
    }
}

/// One row of the wide table: a station on a date and its six canonical values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub key: StationDate,
    /// Indexed by [`Characteristic::index`]; `None` marks a missing value.
    pub values: [Option<f64>; 6],
}

impl FeatureRow {
    pub fn new(key: StationDate) -> Self {
        FeatureRow {
            key,
            values: [None; 6],
        }
    }

    pub fn get(&self, characteristic: Characteristic) -> Option<f64> {
        self.values[characteristic.index()]
    }

    /// Whether the supervised target (chlorophyll) is present.
    pub fn has_target(&self) -> bool {
        self.get(Characteristic::Chlorophyll).is_some()
    }

    /// Whether every canonical column holds a value.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }
}

/// A wide feature table, rows in station-date order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pivot long-format records into one row per station and date.
    ///
    /// Records whose characteristic is not canonical, whose value is missing
    /// or non-numeric, or whose date cannot be parsed contribute nothing.
    /// A station-date with no usable value produces no row.
    pub fn pivot(records: &[MonitoringRecord], aggregation: Aggregation) -> FeatureTable {
        let mut cells: BTreeMap<StationDate, [Cell; 6]> = BTreeMap::new();
        let mut bad_dates = 0u32;
        let mut no_value = 0u32;

        for record in records {
            let Some(characteristic) = record.canonical() else {
                continue;
            };
            let Some(value) = record.value() else {
                no_value += 1;
                continue;
            };
            let key = match record.station_date() {
                Ok(key) => key,
                Err(e) => {
                    warn!(
                        "Skipping {} reading at {}: {}",
                        characteristic, record.location_id, e
                    );
                    bad_dates += 1;
                    continue;
                }
            };
            cells.entry(key).or_default()[characteristic.index()].push(value);
        }

        if no_value > 0 {
            info!("{} relevant readings had no numeric result", no_value);
        }
        if bad_dates > 0 {
            warn!("{} relevant readings had an unparseable activity date", bad_dates);
        }

        let rows = cells
            .into_iter()
            .map(|(key, row_cells)| {
                let mut row = FeatureRow::new(key);
                for (slot, cell) in row.values.iter_mut().zip(row_cells.iter()) {
                    *slot = cell.resolve(aggregation);
                }
                row
            })
            .collect();
        FeatureTable { rows }
    }

    /// Keep only rows matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> FeatureTable
    where
        F: Fn(&FeatureRow) -> bool,
    {
        FeatureTable {
            rows: self.rows.iter().filter(|r| predicate(*r)).cloned().collect(),
        }
    }

    /// Spread the table back into long-format records, one per present value.
    ///
    /// Pivoting the result with any aggregation reproduces this table.
    pub fn melt(&self) -> Vec<MonitoringRecord> {
        let mut records = Vec::new();
        for row in &self.rows {
            for characteristic in Characteristic::ALL {
                if let Some(value) = row.get(characteristic) {
                    records.push(MonitoringRecord {
                        location_id: row.key.location_id.clone(),
                        location_name: row.key.location_name.clone(),
                        latitude: row.key.latitude.clone(),
                        longitude: row.key.longitude.clone(),
                        activity_start_date: format_date(&row.key.date),
                        characteristic_name: characteristic.source_name().to_string(),
                        result_value: value.to_string(),
                        result_unit: String::new(),
                    });
                }
            }
        }
        records
    }

    /// Write the table as CSV: location/date columns, then one column per
    /// canonical characteristic. Missing values are empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        let header: Vec<&str> = KEY_COLUMNS
            .iter()
            .copied()
            .chain(Characteristic::ALL.iter().map(|c| c.column_name()))
            .collect();
        wtr.write_record(&header)?;

        for row in &self.rows {
            let mut fields: Vec<String> = vec![
                row.key.location_id.clone(),
                row.key.location_name.clone(),
                row.key.latitude.clone(),
                row.key.longitude.clone(),
                format_date(&row.key.date),
            ];
            fields.extend(
                row.values
                    .iter()
                    .map(|v| v.map_or(String::new(), |v| v.to_string())),
            );
            wtr.write_record(&fields)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Dates covered by the table, earliest and latest.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.key.date).min()?;
        let max = self.rows.iter().map(|r| r.key.date).max()?;
        Some((min, max))
    }
}

/// Outputs of the algae reshaper.
#[derive(Debug, Clone, PartialEq)]
pub struct Reshaped {
    /// Every pivoted station-date row, before target filtering.
    pub pivoted: FeatureTable,
    /// Rows with a chlorophyll value.
    pub with_target: FeatureTable,
    /// Rows with all six canonical values.
    pub complete: FeatureTable,
}

fn distinct_names<'a, I>(names: I) -> Vec<&'a str>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    names.filter(|n| seen.insert(*n)).collect()
}

/// Reshape long-format monitoring records into the target-bearing and
/// complete feature tables.
///
/// Returns `None` when no record carries a recognised characteristic.
pub fn reshape(records: &[MonitoringRecord], aggregation: Aggregation) -> Option<Reshaped> {
    let available = distinct_names(records.iter().map(|r| r.characteristic_name.as_str()));
    info!("Available characteristics: {:?}", available);

    let found = distinct_names(
        records
            .iter()
            .filter(|r| r.canonical().is_some())
            .map(|r| r.characteristic_name.as_str()),
    );
    info!("Found relevant characteristics: {:?}", found);

    if found.is_empty() {
        info!("No relevant characteristics found in the dataset.");
        return None;
    }

    let pivoted = FeatureTable::pivot(records, aggregation);
    info!("Total rows before filtering: {}", pivoted.len());

    let with_target = pivoted.filter(FeatureRow::has_target);
    info!("Rows with chlorophyll measurements: {}", with_target.len());

    let complete = with_target.filter(FeatureRow::is_complete);
    info!(
        "Rows with complete data (no missing values): {}",
        complete.len()
    );

    Some(Reshaped {
        pivoted,
        with_target,
        complete,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = include_str!("../../fixtures/algae_sample.csv");

    fn sample_records() -> Vec<MonitoringRecord> {
        MonitoringRecord::parse_monitoring_csv(SAMPLE).unwrap()
    }

    fn row_for<'a>(table: &'a FeatureTable, id: &str, y: i32, m: u32, d: u32) -> &'a FeatureRow {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        table
            .rows
            .iter()
            .find(|r| r.key.location_id == id && r.key.date == date)
            .unwrap()
    }

    #[test]
    fn test_pivot_one_row_per_station_date() {
        let table = FeatureTable::pivot(&sample_records(), Aggregation::First);
        assert_eq!(table.len(), 5);
        let ids: Vec<&str> = table.rows.iter().map(|r| r.key.location_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["AB-GUL-03", "AB-PIG-02", "AB-PIG-02", "AB-SYL-01", "AB-SYL-01"]
        );
    }

    #[test]
    fn test_pivot_folds_name_variants() {
        let table = FeatureTable::pivot(&sample_records(), Aggregation::First);
        let row = row_for(&table, "AB-PIG-02", 2019, 8, 13);
        assert_eq!(row.get(Characteristic::Light), Some(1380.0));
        assert_eq!(row.get(Characteristic::SecchiDepth), Some(1.6));
        assert_eq!(row.get(Characteristic::Chlorophyll), None);
    }

    #[test]
    fn test_duplicate_readings_follow_aggregation() {
        let records = sample_records();
        let first = FeatureTable::pivot(&records, Aggregation::First);
        let last = FeatureTable::pivot(&records, Aggregation::Last);
        let mean = FeatureTable::pivot(&records, Aggregation::Mean);
        let n = Characteristic::InorganicNitrogen;
        assert_eq!(row_for(&first, "AB-SYL-01", 2019, 8, 12).get(n), Some(0.12));
        assert_eq!(row_for(&last, "AB-SYL-01", 2019, 8, 12).get(n), Some(0.30));
        let avg = row_for(&mean, "AB-SYL-01", 2019, 8, 12).get(n).unwrap();
        assert!((avg - 0.21).abs() < 1e-12);
    }

    #[test]
    fn test_blank_reading_does_not_count_as_first() {
        let csv = "\
MonitoringLocationID,MonitoringLocationName,MonitoringLocationLatitude,MonitoringLocationLongitude,ActivityStartDate,CharacteristicName,ResultValue,ResultUnit
A,Lake A,1.0,2.0,2019-07-15,Nitrate,,mg/L
A,Lake A,1.0,2.0,2019-07-15,Nitrate,0.7,mg/L
A,Lake A,1.0,2.0,2019-07-15,Nitrate,0.9,mg/L
";
        let records = MonitoringRecord::parse_monitoring_csv(csv).unwrap();
        let n = Characteristic::InorganicNitrogen;
        let first = FeatureTable::pivot(&records, Aggregation::First);
        let last = FeatureTable::pivot(&records, Aggregation::Last);
        let mean = FeatureTable::pivot(&records, Aggregation::Mean);
        assert_eq!(first.len(), 1);
        assert_eq!(row_for(&first, "A", 2019, 7, 15).get(n), Some(0.7));
        assert_eq!(row_for(&last, "A", 2019, 7, 15).get(n), Some(0.9));
        let avg = row_for(&mean, "A", 2019, 7, 15).get(n).unwrap();
        assert!((avg - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_rows_without_chlorophyll_never_survive() {
        let reshaped = reshape(&sample_records(), Aggregation::First).unwrap();
        assert_eq!(reshaped.pivoted.len(), 5);
        assert_eq!(reshaped.with_target.len(), 3);
        assert!(reshaped.with_target.rows.iter().all(FeatureRow::has_target));
        assert!(reshaped.complete.rows.iter().all(FeatureRow::has_target));
        // Gull Lake's chlorophyll was blank or carried an unusable date
        assert!(reshaped
            .with_target
            .rows
            .iter()
            .all(|r| r.key.location_id != "AB-GUL-03"));
    }

    #[test]
    fn test_complete_rows_have_every_column() {
        let reshaped = reshape(&sample_records(), Aggregation::First).unwrap();
        assert_eq!(reshaped.complete.len(), 2);
        for row in &reshaped.complete.rows {
            assert!(row.values.iter().all(Option::is_some));
            assert_eq!(row.key.location_id, "AB-SYL-01");
        }
        // Pigeon Lake in July has chlorophyll but no light or secchi reading
        let pigeon = row_for(&reshaped.with_target, "AB-PIG-02", 2019, 7, 16);
        assert!(!pigeon.is_complete());
        assert_eq!(pigeon.get(Characteristic::Light), None);
    }

    #[test]
    fn test_no_relevant_characteristics() {
        let csv = "\
MonitoringLocationID,MonitoringLocationName,MonitoringLocationLatitude,MonitoringLocationLongitude,ActivityStartDate,CharacteristicName,ResultValue,ResultUnit
A,Lake A,1.0,2.0,2019-07-15,pH,8.1,None
A,Lake A,1.0,2.0,2019-07-15,Turbidity,3.0,NTU
";
        let records = MonitoringRecord::parse_monitoring_csv(csv).unwrap();
        assert!(reshape(&records, Aggregation::First).is_none());
        assert!(reshape(&[], Aggregation::First).is_none());
    }

    #[test]
    fn test_pivot_is_idempotent() {
        for aggregation in [Aggregation::First, Aggregation::Last, Aggregation::Mean] {
            let once = reshape(&sample_records(), aggregation).unwrap();
            let twice = reshape(&once.with_target.melt(), aggregation).unwrap();
            assert_eq!(twice.pivoted, once.with_target);
            assert_eq!(twice.with_target, once.with_target);
            assert_eq!(twice.complete, once.complete);
        }
    }

    #[test]
    fn test_write_csv_layout() {
        let reshaped = reshape(&sample_records(), Aggregation::First).unwrap();
        let mut out = Vec::new();
        reshaped.complete.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "MonitoringLocationID,MonitoringLocationName,MonitoringLocationLatitude,MonitoringLocationLongitude,ActivityStartDate,water_temperature,chlorophyll,light,inorganic_nitrogen,total_phosphorus,secchi_depth"
        );
        assert_eq!(
            lines.next().unwrap(),
            "AB-SYL-01,Sylvan Lake,52.3120,-114.0950,2019-07-15,19.4,6.2,1450,0.08,0.021,3.1"
        );
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_write_csv_leaves_missing_empty() {
        let reshaped = reshape(&sample_records(), Aggregation::First).unwrap();
        let mut out = Vec::new();
        reshaped.with_target.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("AB-PIG-02,Pigeon Lake,53.0210,-114.1510,2019-07-16,20.2,24.5,,0.05,0.047,\n"));
    }

    #[test]
    fn test_date_span() {
        let reshaped = reshape(&sample_records(), Aggregation::First).unwrap();
        let (start, end) = reshaped.with_target.date_span().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2019, 7, 15).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2019, 8, 12).unwrap());
        assert!(FeatureTable::default().date_span().is_none());
    }

    #[test]
    fn test_aggregation_from_str() {
        assert_eq!("first".parse::<Aggregation>().unwrap(), Aggregation::First);
        assert_eq!("MEAN".parse::<Aggregation>().unwrap(), Aggregation::Mean);
        assert!("median".parse::<Aggregation>().is_err());
        assert_eq!(Aggregation::default(), Aggregation::First);
        assert_eq!(Aggregation::Last.to_string(), "last");
    }
}
