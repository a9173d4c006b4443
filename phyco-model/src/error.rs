/// Error types for model loading and assessment
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    /// The artifact file could not be read
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for any known model kind
    #[error("Failed to parse model artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// Coefficient count disagrees with the feature vector length
    #[error("Model expects {found} features, service provides {expected}")]
    FeatureCount { expected: usize, found: usize },

    /// A tree in a boosted ensemble is malformed
    #[error("Invalid tree {tree}: {reason}")]
    InvalidTree { tree: usize, reason: String },

    /// The model produced NaN or an infinity
    #[error("Model prediction is not finite: {0}")]
    NonFinitePrediction(f64),

    /// The biomass ceiling is zero or so extreme that the ratio is not finite
    #[error("Predicted chlorophyll {0} gives an unusable biomass ceiling")]
    DegenerateCeiling(f64),
}
