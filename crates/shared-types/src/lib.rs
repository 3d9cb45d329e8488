//! # Shared Types Crate
//!
//! Account entities used by the ledger, the API gateway and the node runtime.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the account model is defined once, here.
//! - **Unsigned amounts**: balances and holds cannot go negative by construction.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
