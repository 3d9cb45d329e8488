//! # Adapters
//!
//! Port implementations that live in the runtime rather than in the
//! ledger crate.

pub mod storage;
