//! # Service Container
//!
//! Holds the ledger and the gateway and wires them together.
//!
//! ## Initialization Order
//!
//! ```text
//! Phase 1: Storage backend (memory, file or rocksdb)
//! Phase 2: Account Ledger over the store
//! Phase 3: API Gateway over the ledger
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use hb_01_account_ledger::{AccountLedgerApi, AccountLedgerService};
use hb_02_api_gateway::ApiGatewayService;

use crate::adapters::storage::{open_store, DynStore};
use crate::container::config::NodeConfig;

/// Ledger type used by the node: backend chosen at runtime.
pub type NodeLedger = AccountLedgerService<DynStore>;

/// Central container holding the service instances.
pub struct ServiceContainer {
    /// Account Ledger (hb-01).
    pub ledger: Arc<NodeLedger>,

    /// API Gateway (hb-02).
    pub gateway: Arc<ApiGatewayService>,

    /// Node configuration (immutable after initialization).
    pub config: NodeConfig,
}

impl ServiceContainer {
    /// Create the container with every service initialized.
    #[instrument(name = "service_init", skip(config))]
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        info!(backend = ?config.storage.backend, data_dir = %config.storage.data_dir.display(), "Phase 1: Opening storage");
        let store = open_store(&config.storage).context("Failed to open storage backend")?;

        info!("Phase 2: Initializing Account Ledger");
        let ledger = Arc::new(AccountLedgerService::new(store));

        info!("Phase 3: Initializing API Gateway");
        let ledger_api: Arc<dyn AccountLedgerApi> = ledger.clone();
        let gateway = ApiGatewayService::new(config.gateway_config(), ledger_api)
            .context("Failed to create API Gateway")?;

        Ok(Self {
            ledger,
            gateway: Arc::new(gateway),
            config,
        })
    }

    /// Ledger behind the port trait.
    pub fn ledger_api(&self) -> Arc<dyn AccountLedgerApi> {
        self.ledger.clone()
    }
}
