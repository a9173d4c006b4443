//! HTTP surface for biomass feasibility predictions.
//!
//! Exposes a single inference endpoint, `POST /predict`, plus a health
//! probe. `api_router()` returns a composable `Router`; `server` binds it
//! to a socket and manages shutdown.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, PredictionServer};
pub use types::ApiContext;
