//! Plausibility check of a reported harvest against the predicted chlorophyll ceiling.

use crate::{
    credits::{calculate_phyco_credits, PhycoCredits},
    error::ModelError,
    Regressor, FEATURE_COUNT,
};
use serde::Serialize;

/// Fresh to dry weight, 10:1.
pub const FRESH_TO_DRY_RATIO: f64 = 0.1;

/// Chlorophyll to dry weight, 1:20.
pub const DRY_TO_CHLORO_RATIO: f64 = 1.0 / 20.0;

/// Whether a reported biomass figure is wet or already dried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Dry,
    Fresh,
}

impl InputType {
    pub fn from_is_dry(is_dry: bool) -> InputType {
        if is_dry {
            InputType::Dry
        } else {
            InputType::Fresh
        }
    }
}

/// Outcome of a feasibility assessment, with the harvest's credit value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeasibilityReport {
    pub feasible: bool,
    pub q95_chlorophyll: f64,
    pub q95_dry_biomass_lb: f64,
    pub reported_input_biomass_lb: f64,
    pub input_type: InputType,
    pub reported_dry_biomass_lb: f64,
    pub ratio: f64,
    #[serde(flatten)]
    pub credits: PhycoCredits,
}

/// Convert a reported biomass to dry weight.
pub fn dry_biomass(reported_biomass_lb: f64, input_type: InputType) -> f64 {
    match input_type {
        InputType::Dry => reported_biomass_lb,
        InputType::Fresh => reported_biomass_lb * FRESH_TO_DRY_RATIO,
    }
}

/// Upper bound on dry biomass implied by a chlorophyll concentration.
pub fn dry_biomass_ceiling(q95_chlorophyll: f64) -> f64 {
    q95_chlorophyll / DRY_TO_CHLORO_RATIO
}

/// Assess whether `reported_biomass_lb` is attainable under the conditions in `features`.
///
/// The harvest is feasible when its dry weight does not exceed the ceiling
/// derived from the model's upper-quantile chlorophyll prediction.
pub fn assess_biomass_feasibility(
    model: &dyn Regressor,
    features: &[f64; FEATURE_COUNT],
    reported_biomass_lb: f64,
    is_dry_input: bool,
) -> Result<FeasibilityReport, ModelError> {
    let q95_chlorophyll = model.predict(features);
    if !q95_chlorophyll.is_finite() {
        return Err(ModelError::NonFinitePrediction(q95_chlorophyll));
    }

    let input_type = InputType::from_is_dry(is_dry_input);
    let reported_dry_biomass_lb = dry_biomass(reported_biomass_lb, input_type);
    let q95_dry_biomass_lb = dry_biomass_ceiling(q95_chlorophyll);
    let ratio = reported_dry_biomass_lb / q95_dry_biomass_lb;
    // both must serialize as JSON numbers
    if q95_dry_biomass_lb == 0.0 || !q95_dry_biomass_lb.is_finite() || !ratio.is_finite() {
        return Err(ModelError::DegenerateCeiling(q95_chlorophyll));
    }
    let feasible = reported_dry_biomass_lb <= q95_dry_biomass_lb;

    Ok(FeasibilityReport {
        feasible,
        q95_chlorophyll,
        q95_dry_biomass_lb,
        reported_input_biomass_lb: reported_biomass_lb,
        input_type,
        reported_dry_biomass_lb,
        ratio,
        credits: calculate_phyco_credits(reported_dry_biomass_lb),
    })
}
