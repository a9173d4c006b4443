//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::types::ApiContext;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: &'static str,
    pub version: &'static str,
}

/// `GET /health`: liveness probe reporting the loaded model family.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: ctx.model.kind(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
