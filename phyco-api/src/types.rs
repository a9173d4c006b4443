//! Shared types for the prediction API.

use std::sync::Arc;

use phyco_model::{Regressor, FEATURE_COUNT};
use serde_json::Value;

use crate::error::ApiError;

pub const FEATURES_REQUIRED: &str = "Please provide a list of 5 features.";
pub const BIOMASS_REQUIRED: &str = "Please provide reported_biomass_lb.";

/// Shared context for all API routes.
///
/// The model is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct ApiContext {
    pub model: Arc<dyn Regressor>,
}

impl ApiContext {
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self { model }
    }
}

/// A `/predict` request after the presence checks.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictRequest {
    pub features: [f64; FEATURE_COUNT],
    pub reported_biomass_lb: f64,
    pub is_dry_input: bool,
}

/// JSON truthiness: null, false, zero, and empty strings or collections are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// A JSON number, or a boolean read as 0 or 1.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        other => other.as_f64(),
    }
}

impl PredictRequest {
    /// Extract a request from a decoded JSON body.
    ///
    /// Only two things are checked up front, in this order: `features` is a
    /// list of exactly five items, and `reported_biomass_lb` is present and
    /// truthy. Either failure is a 400. Items that then turn out not to be
    /// numbers (booleans count as 0 and 1) are internal errors.
    pub fn from_json(body: &Value) -> Result<PredictRequest, ApiError> {
        // Strings and objects of length five are rejected here too, not
        // left to fail as internal errors.
        let items = match body.get("features") {
            Some(Value::Array(items)) if items.len() == FEATURE_COUNT => items,
            _ => return Err(ApiError::BadRequest(FEATURES_REQUIRED.to_string())),
        };
        let biomass = match body.get("reported_biomass_lb") {
            Some(value) if is_truthy(value) => value,
            _ => return Err(ApiError::BadRequest(BIOMASS_REQUIRED.to_string())),
        };

        let mut features = [0.0; FEATURE_COUNT];
        for (slot, item) in features.iter_mut().zip(items) {
            *slot = as_number(item)
                .ok_or_else(|| ApiError::Internal(format!("feature {} is not a number", item)))?;
        }
        let reported_biomass_lb = as_number(biomass).ok_or_else(|| {
            ApiError::Internal(format!("reported_biomass_lb {} is not a number", biomass))
        })?;
        let is_dry_input = body.get("is_dry_input").is_some_and(is_truthy);

        Ok(PredictRequest {
            features,
            reported_biomass_lb,
            is_dry_input,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bad_request_message(body: Value) -> String {
        match PredictRequest::from_json(&body) {
            Err(ApiError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn parses_full_request() {
        let body = json!({"features": [20, 15, 0.5, 0.3, 0.04], "reported_biomass_lb": 50, "is_dry_input": true});
        let request = PredictRequest::from_json(&body).unwrap();
        assert_eq!(request.features, [20.0, 15.0, 0.5, 0.3, 0.04]);
        assert_eq!(request.reported_biomass_lb, 50.0);
        assert!(request.is_dry_input);
    }

    #[test]
    fn dry_flag_defaults_to_fresh() {
        let body = json!({"features": [1, 2, 3, 4, 5], "reported_biomass_lb": 1.5});
        assert!(!PredictRequest::from_json(&body).unwrap().is_dry_input);
        let body = json!({"features": [1, 2, 3, 4, 5], "reported_biomass_lb": 1.5, "is_dry_input": null});
        assert!(!PredictRequest::from_json(&body).unwrap().is_dry_input);
    }

    #[test]
    fn features_checked_before_biomass() {
        assert_eq!(bad_request_message(json!({})), FEATURES_REQUIRED);
        assert_eq!(bad_request_message(json!({"features": null})), FEATURES_REQUIRED);
        assert_eq!(bad_request_message(json!({"features": []})), FEATURES_REQUIRED);
        assert_eq!(
            bad_request_message(json!({"features": [1, 2, 3, 4], "reported_biomass_lb": 50})),
            FEATURES_REQUIRED
        );
        assert_eq!(
            bad_request_message(json!({"features": [1, 2, 3, 4, 5, 6], "reported_biomass_lb": 50})),
            FEATURES_REQUIRED
        );
        assert_eq!(bad_request_message(json!({"features": "12345"})), FEATURES_REQUIRED);
        assert_eq!(bad_request_message(json!([1, 2, 3, 4, 5])), FEATURES_REQUIRED);
    }

    #[test]
    fn biomass_must_be_present_and_truthy() {
        assert_eq!(
            bad_request_message(json!({"features": [1, 2, 3, 4, 5]})),
            BIOMASS_REQUIRED
        );
        assert_eq!(
            bad_request_message(json!({"features": [1, 2, 3, 4, 5], "reported_biomass_lb": null})),
            BIOMASS_REQUIRED
        );
        assert_eq!(
            bad_request_message(json!({"features": [1, 2, 3, 4, 5], "reported_biomass_lb": 0})),
            BIOMASS_REQUIRED
        );
    }

    #[test]
    fn non_numeric_values_are_internal_errors() {
        let body = json!({"features": [1, "warm", 3, 4, 5], "reported_biomass_lb": 50});
        assert!(matches!(
            PredictRequest::from_json(&body),
            Err(ApiError::Internal(_))
        ));
        let body = json!({"features": [1, 2, 3, 4, 5], "reported_biomass_lb": "fifty"});
        assert!(matches!(
            PredictRequest::from_json(&body),
            Err(ApiError::Internal(_))
        ));
    }

    #[test]
    fn booleans_read_as_zero_and_one() {
        let body = json!({"features": [true, 2, false, 4, 5], "reported_biomass_lb": true});
        let request = PredictRequest::from_json(&body).unwrap();
        assert_eq!(request.features, [1.0, 2.0, 0.0, 4.0, 5.0]);
        assert_eq!(request.reported_biomass_lb, 1.0);
        // false is falsy, so it never gets that far
        assert_eq!(
            bad_request_message(json!({"features": [1, 2, 3, 4, 5], "reported_biomass_lb": false})),
            BIOMASS_REQUIRED
        );
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!(-2.5)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!(true)));
    }
}
