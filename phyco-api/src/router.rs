//! Prediction API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Browser origins on `http://localhost` (any port) are allowed through CORS
//! for the companion web front end.

use std::sync::Arc;

use axum::http::{header, request::Parts, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use phyco_model::Regressor;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::endpoints;
use crate::types::ApiContext;

/// Build the prediction router around a loaded model.
pub fn api_router(model: Arc<dyn Regressor>) -> Router {
    let ctx = ApiContext::new(model);
    Router::new()
        .route("/predict", post(endpoints::predict::predict))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx)
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| is_localhost_origin(origin),
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// `http://localhost` or `http://localhost:<port>`.
fn is_localhost_origin(origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    match origin.strip_prefix("http://localhost") {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())),
        None => false,
    }
}
