//! # Ports
//!
//! - `inbound`: the ledger API offered to the gateway and the runtime
//! - `outbound`: storage and codec interfaces the host provides

pub mod inbound;
pub mod outbound;

pub use inbound::AccountLedgerApi;
pub use outbound::{AccountCodec, BatchOperation, BincodeAccountCodec, KeyValueStore};
