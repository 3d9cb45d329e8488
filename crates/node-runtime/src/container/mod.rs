//! # Service Container
//!
//! Holds the ledger and gateway instances with their configuration.

pub mod config;
pub mod services;

pub use config::{ConfigError, NodeConfig, StorageBackend};
pub use services::{NodeLedger, ServiceContainer};
