//! # Hold Balance Node
//!
//! Entry point of the balance/hold service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration from the environment
//! 3. Open storage, seed accounts, start settlement
//! 4. Serve HTTP until SIGINT or SIGTERM

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use node_runtime::signal::ShutdownSignal;
use node_runtime::telemetry::{init_logging, TelemetryConfig};
use node_runtime::{NodeConfig, NodeRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    let config = NodeConfig::from_env().context("Failed to load configuration")?;
    let runtime = Arc::new(NodeRuntime::new(config)?);
    let mut signals = ShutdownSignal::install().context("Failed to install signal handlers")?;

    let mut server = {
        let runtime = Arc::clone(&runtime);
        tokio::spawn(async move { runtime.start().await })
    };

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::select! {
        signal = signals.recv() => match signal {
            Ok(name) => info!(signal = name, "Shutdown signal received"),
            Err(e) => error!("Failed to listen for shutdown signals: {}", e),
        },
        result = &mut server => {
            runtime.shutdown().await;
            return result.context("Server task panicked")?;
        }
    }

    // Graceful shutdown
    runtime.shutdown().await;
    server.await.context("Server task panicked")?
}
