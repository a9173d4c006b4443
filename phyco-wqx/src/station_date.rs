use chrono::NaiveDate;

/// Identifies one row of the wide feature table: a monitoring location on a
/// given activity date.
///
/// Location fields are kept as the source text so coordinates round-trip
/// exactly; ordering is lexicographic over the fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationDate {
    pub location_id: String,
    pub location_name: String,
    pub latitude: String,
    pub longitude: String,
    pub date: NaiveDate,
}

impl StationDate {
    pub fn new(
        location_id: &str,
        location_name: &str,
        latitude: &str,
        longitude: &str,
        date: NaiveDate,
    ) -> Self {
        StationDate {
            location_id: location_id.trim().to_string(),
            location_name: location_name.trim().to_string(),
            latitude: latitude.trim().to_string(),
            longitude: longitude.trim().to_string(),
            date,
        }
    }
}
