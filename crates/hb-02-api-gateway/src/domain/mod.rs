//! Domain layer for the API Gateway.

pub mod config;
pub mod envelope;
pub mod error;

pub use config::*;
pub use envelope::*;
pub use error::*;
