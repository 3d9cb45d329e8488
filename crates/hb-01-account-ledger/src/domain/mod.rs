//! # Domain Layer
//!
//! Pure ledger logic: rules, errors, value objects and the row-lock registry.

pub mod errors;
pub mod locks;
pub mod rules;
pub mod value_objects;

pub use errors::{KVStoreError, LedgerError, SerializationError};
pub use locks::{RowGuard, RowLocks};
pub use rules::subtraction_is_possible;
pub use value_objects::{KeyPrefix, SettlementReport};
