//! Prediction server lifecycle.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info};
use phyco_model::Regressor;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::router::api_router;

/// Handle to a running prediction server.
pub struct PredictionServer {
    /// The address actually bound, with the resolved port when 0 was requested.
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PredictionServer {
    /// Ask the server to stop accepting connections. Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("Prediction server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish draining in-flight requests.
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            error!("Prediction server task failed: {}", e);
        }
    }
}

/// Bind `addr` and serve the prediction API in a background task.
pub async fn start_server(
    model: Arc<dyn Regressor>,
    addr: SocketAddr,
) -> std::io::Result<PredictionServer> {
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    let app = api_router(model);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            info!("Prediction server received shutdown signal");
        };

        info!("Prediction server listening on http://{}", addr);

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            error!("Prediction server error: {}", e);
        }

        info!("Prediction server stopped");
    });

    Ok(PredictionServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
