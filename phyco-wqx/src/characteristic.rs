use std::fmt;

/// One of the six measurements the algae feature table is built from.
///
/// Declaration order is the column order of the wide table.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Characteristic {
    WaterTemperature,
    Chlorophyll,
    Light,
    InorganicNitrogen,
    TotalPhosphorus,
    SecchiDepth,
}

/// Source characteristic names and the canonical characteristic each folds onto.
///
/// Matching is exact; agencies spell these inconsistently and anything not
/// listed here is ignored.
pub const SOURCE_NAMES: [(&str, Characteristic); 13] = [
    ("Temperature, water", Characteristic::WaterTemperature),
    (
        "Chlorophyll a, corrected for pheophytin",
        Characteristic::Chlorophyll,
    ),
    (
        "Light, photosynthetic active radiation (PAR)",
        Characteristic::Light,
    ),
    ("Light intensity", Characteristic::Light),
    (
        "Inorganic nitrogen (nitrate and nitrite)",
        Characteristic::InorganicNitrogen,
    ),
    ("Nitrogen, inorganic", Characteristic::InorganicNitrogen),
    ("Nitrate", Characteristic::InorganicNitrogen),
    (
        "Total Phosphorus, mixed forms",
        Characteristic::TotalPhosphorus,
    ),
    ("Phosphorus", Characteristic::TotalPhosphorus),
    ("Depth, Secchi disk depth", Characteristic::SecchiDepth),
    ("Secchi disk depth", Characteristic::SecchiDepth),
    ("Depth, secchi disk", Characteristic::SecchiDepth),
    ("Transparency, Secchi disc", Characteristic::SecchiDepth),
];

impl Characteristic {
    /// All canonical characteristics in wide-table column order.
    pub const ALL: [Characteristic; 6] = [
        Characteristic::WaterTemperature,
        Characteristic::Chlorophyll,
        Characteristic::Light,
        Characteristic::InorganicNitrogen,
        Characteristic::TotalPhosphorus,
        Characteristic::SecchiDepth,
    ];

    /// The model's input features, in the positional order it was trained on.
    /// Chlorophyll is the target and never an input.
    pub const FEATURES: [Characteristic; 5] = [
        Characteristic::WaterTemperature,
        Characteristic::Light,
        Characteristic::InorganicNitrogen,
        Characteristic::TotalPhosphorus,
        Characteristic::SecchiDepth,
    ];

    /// Column name used in the wide feature table.
    pub fn column_name(&self) -> &'static str {
        match self {
            Characteristic::WaterTemperature => "water_temperature",
            Characteristic::Chlorophyll => "chlorophyll",
            Characteristic::Light => "light",
            Characteristic::InorganicNitrogen => "inorganic_nitrogen",
            Characteristic::TotalPhosphorus => "total_phosphorus",
            Characteristic::SecchiDepth => "secchi_depth",
        }
    }

    /// Position of this characteristic in [`Characteristic::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Normalize a source `CharacteristicName` onto its canonical characteristic.
    pub fn from_source_name(name: &str) -> Option<Characteristic> {
        SOURCE_NAMES
            .iter()
            .find(|(source, _)| *source == name)
            .map(|(_, canonical)| *canonical)
    }

    /// A source name that this characteristic can be written back as.
    pub fn source_name(&self) -> &'static str {
        SOURCE_NAMES
            .iter()
            .find(|(_, canonical)| canonical == self)
            .map(|(source, _)| *source)
            .unwrap_or_else(|| self.column_name())
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
