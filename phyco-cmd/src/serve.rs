//! Feasibility prediction server.

use anyhow::Context;
use log::info;
use phyco_api::start_server;
use phyco_model::{QuantileModel, Regressor};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

/// Load the model artifact and serve it until Ctrl-C.
pub async fn run_serve(model_path: &Path, host: IpAddr, port: u16) -> anyhow::Result<()> {
    let model: Arc<dyn Regressor> = Arc::new(QuantileModel::load(model_path)?);

    let addr = SocketAddr::new(host, port);
    let mut server = start_server(model, addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Serving predictions on http://{} (Ctrl-C to stop)", server.addr);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Ctrl-C received, shutting down");
    server.shutdown();
    server.stopped().await;
    Ok(())
}
