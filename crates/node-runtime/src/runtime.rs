//! # Node Runtime
//!
//! Runs the settlement task and the HTTP gateway until shutdown.
//!
//! ## Startup Sequence
//!
//! 1. Build the service container (storage → ledger → gateway)
//! 2. Apply the seed file, if any
//! 3. Spawn the settlement task
//! 4. Serve HTTP until `shutdown()`

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use hb_01_account_ledger::run_settlement_loop;

use crate::container::{NodeConfig, ServiceContainer};
use crate::seed::{apply_seed, load_seed_file, SeedReport};

/// The node runtime orchestrating the ledger and the gateway.
pub struct NodeRuntime {
    /// Service container with all initialized services.
    container: ServiceContainer,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Settlement task, once spawned.
    settlement: Mutex<Option<JoinHandle<()>>>,
}

impl NodeRuntime {
    /// Create a node runtime with configuration.
    pub fn new(config: NodeConfig) -> Result<Self> {
        info!(name = %config.name, "Creating node runtime");

        let container = ServiceContainer::new(config)?;
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            container,
            shutdown_tx,
            settlement: Mutex::new(None),
        })
    }

    /// Bind the configured address and run until shutdown.
    pub async fn start(&self) -> Result<()> {
        self.prepare().await?;
        self.container
            .gateway
            .start()
            .await
            .context("API Gateway failed")
    }

    /// Run on an already bound listener until shutdown.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        self.prepare().await?;
        self.container
            .gateway
            .serve(listener)
            .await
            .context("API Gateway failed")
    }

    async fn prepare(&self) -> Result<()> {
        info!("===========================================");
        info!("  Hold Balance Node v{}", env!("CARGO_PKG_VERSION"));
        info!("  Instance: {}", self.container.config.name);
        info!("===========================================");

        self.seed().await?;
        self.start_settlement();
        Ok(())
    }

    /// Apply the configured seed file.
    pub async fn seed(&self) -> Result<SeedReport> {
        let Some(path) = &self.container.config.storage.seed_file else {
            return Ok(SeedReport::default());
        };

        info!(path = %path.display(), "Applying seed file");
        let accounts = load_seed_file(path)?;
        let report = apply_seed(self.container.ledger.as_ref(), accounts)
            .await
            .context("Failed to seed accounts")?;
        Ok(report)
    }

    fn start_settlement(&self) {
        let settings = &self.container.config.settlement;
        if !settings.enabled {
            info!("Hold settlement disabled");
            return;
        }

        let mut slot = self.settlement.lock();
        if slot.is_some() {
            return;
        }
        *slot = Some(tokio::spawn(run_settlement_loop(
            Arc::clone(&self.container.ledger),
            settings.interval,
            self.shutdown_tx.subscribe(),
        )));
    }

    /// Shutdown the node gracefully.
    ///
    /// ## Shutdown Sequence
    ///
    /// 1. Signal the settlement task and the gateway
    /// 2. Wait for the settlement task to finish its current pass
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        self.shutdown_tx.send_replace(true);
        self.container.gateway.shutdown();

        let handle = self.settlement.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Settlement task failed: {}", e);
            }
        }

        info!("Shutdown complete");
    }

    /// Get a reference to the service container.
    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }
}
