//! Server lifecycle management
//!
//! Binds the HTTP listener, serves the addon router and shuts down
//! gracefully on SIGINT/SIGTERM.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use playlistio_api::{create_router, AppState};
use playlistio_core::provider::CatalogSource;
use playlistio_core::Config;
use playlistio_providers::AddonClient;

pub struct PlaylistioServer {
    config: Config,
    source: Arc<dyn CatalogSource>,
}

impl PlaylistioServer {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = AddonClient::new(config.remote.client_options())?;
        Ok(Self {
            config,
            source: Arc::new(client),
        })
    }

    /// Start the HTTP server and wait for a shutdown signal
    pub async fn start(self) -> anyhow::Result<()> {
        info!("Playlistio server v{} starting...", env!("CARGO_PKG_VERSION"));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let public_url = self.config.public_url();
        let mut http_handle = self.start_http_server(shutdown_rx).await?;

        info!("Access the configuration page at: {}", public_url);

        let stopped = tokio::select! {
            _ = &mut http_handle => {
                error!("HTTP server stopped unexpectedly");
                true
            }
            () = shutdown_signal() => {
                info!("Shutdown signal received, starting graceful shutdown...");
                false
            }
        };

        // Signal the server to stop accepting connections and drain
        let _ = shutdown_tx.send(true);
        if !stopped {
            if let Err(e) = http_handle.await {
                error!("HTTP server task failed: {}", e);
            }
        }

        info!("Playlistio server stopped");
        Ok(())
    }

    /// Start HTTP server with graceful shutdown support
    async fn start_http_server(
        self,
        shutdown_rx: watch::Receiver<bool>,
    ) -> anyhow::Result<JoinHandle<()>> {
        let http_address = self.config.http_address();
        let http_router = create_router(AppState::new(self.config, self.source)?);

        let listener = tokio::net::TcpListener::bind(&http_address)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind HTTP address {http_address}: {e}"))?;
        info!("HTTP server listening on {}", http_address);

        let handle = tokio::spawn(async move {
            let mut rx = shutdown_rx;
            let graceful = async move {
                let _ = rx.changed().await;
            };

            if let Err(e) = axum::serve(listener, http_router)
                .with_graceful_shutdown(graceful)
                .await
            {
                error!("HTTP server error: {}", e);
            }

            info!("HTTP server shut down gracefully");
        });

        Ok(handle)
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("Received Ctrl+C"); }
        () = terminate => { info!("Received SIGTERM"); }
    }
}
