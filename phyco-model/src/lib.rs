//! Biomass feasibility and credit valuation over a pre-trained quantile model.
//!
//! The model predicts an upper-quantile chlorophyll concentration from five
//! environmental measurements. That prediction is converted into a dry
//! biomass ceiling, compared against a reported harvest, and the harvest is
//! priced by its carbon, nitrogen and phosphorus content.
//!
//! # Usage
//!
//! ```rust
//! use phyco_model::{artifact::QuantileModel, feasibility::assess_biomass_feasibility};
//!
//! let model = QuantileModel::from_json(
//!     r#"{"kind":"linear","coefficients":[0.5,0.0,1.0,10.0,-0.5],"intercept":1.0}"#,
//! )
//! .unwrap();
//! let report = assess_biomass_feasibility(&model, &[20.0, 15.0, 0.5, 0.3, 0.04], 50.0, false).unwrap();
//! assert_eq!(report.reported_dry_biomass_lb, 5.0);
//! assert!(report.feasible);
//! ```

pub mod artifact;
pub mod credits;
pub mod error;
pub mod feasibility;

pub use artifact::QuantileModel;
pub use error::ModelError;

/// Number of environmental features the model consumes.
pub const FEATURE_COUNT: usize = 5;

/// A fitted regressor mapping a feature vector to a single scalar.
///
/// Features are positional; their order must match the order used at
/// training time and is not checked here.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64;

    /// Short name of the model family, for logs and health reporting.
    fn kind(&self) -> &'static str;
}
