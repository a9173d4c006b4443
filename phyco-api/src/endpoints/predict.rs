//! Biomass feasibility endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use phyco_model::feasibility::{assess_biomass_feasibility, FeasibilityReport};
use serde_json::Value;

use crate::error::ApiError;
use crate::types::{ApiContext, PredictRequest};

/// `POST /predict`: assess a reported harvest against predicted conditions.
///
/// The body is decoded leniently: anything that is not a JSON object is
/// treated as an empty request and fails the `features` check.
pub async fn predict(
    State(ctx): State<ApiContext>,
    body: Bytes,
) -> Result<Json<FeasibilityReport>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let request = PredictRequest::from_json(&payload)?;

    let report = assess_biomass_feasibility(
        ctx.model.as_ref(),
        &request.features,
        request.reported_biomass_lb,
        request.is_dry_input,
    )?;

    log::info!(
        "Assessed {} lb {:?} harvest: feasible={} ratio={:.3}",
        request.reported_biomass_lb,
        report.input_type,
        report.feasible,
        report.ratio
    );
    Ok(Json(report))
}
