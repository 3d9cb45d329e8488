//! HB-02 API Gateway - HTTP interface of the account ledger.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 API GATEWAY (hb-02)                  │
//! ├──────────────────────────────────────────────────────┤
//! │   POST /api/{ping,status,add,subtract}               │
//! │   GET  /health, /metrics            Port 26500       │
//! │                       │                              │
//! │  ┌────────────────────┴─────────────────────┐        │
//! │  │  Middleware: Tracing → Timeout → Limit   │        │
//! │  └────────────────────┬─────────────────────┘        │
//! │                       │                              │
//! │  ┌────────────────────┴─────────────────────┐        │
//! │  │  Handlers: envelope parsing + mapping    │        │
//! │  └────────────────────┬─────────────────────┘        │
//! └───────────────────────┼──────────────────────────────┘
//!                         ▼
//!                 AccountLedgerApi (hb-01)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use hb_02_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default(), ledger)?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use domain::config::GatewayConfig;
pub use domain::envelope::Envelope;
pub use domain::error::{ApiError, GatewayError};
pub use middleware::GatewayMetrics;
pub use service::ApiGatewayService;

/// Version reported by `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
