//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and service wiring
//! - `adapters/` - Storage backends
//! - `seed` - Account provisioning from a JSON file
//! - `signal` - SIGINT/SIGTERM handling
//! - `telemetry` - Logging setup
//! - `runtime` - Lifecycle of the settlement task and the gateway

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod runtime;
pub mod seed;
pub mod signal;
pub mod telemetry;

pub use container::{NodeConfig, ServiceContainer};
pub use runtime::NodeRuntime;
