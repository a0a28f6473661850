// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::http_server::{create_app, AppState};

/// Default request body ceiling (25 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: String,
    /// Largest accepted request body; the pipeline has no batch limit of its own
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Running HTTP server. Dropping it leaves the server running; call
/// `shutdown` to stop accepting connections and drain in-flight requests.
pub struct ApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Bind `config.listen_addr` and start serving in the background
    pub async fn new(config: ApiConfig, state: AppState) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
        let addr = listener.local_addr()?;
        let app = create_app(state, &config);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let serve_future = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });

            if let Err(e) = serve_future.await {
                error!("API server error: {}", e);
            }
        });

        info!("API server listening on {}", addr);

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.handle.await?;
        info!("API server stopped");
        Ok(())
    }
}
