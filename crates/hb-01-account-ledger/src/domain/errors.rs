//! # Domain Errors
//!
//! Error types for the Account Ledger subsystem.
//!
//! Each ledger error maps to a rejected operation or an infrastructure
//! failure. Domain logic never panics; it returns one of these.

use shared_types::{AccountId, Amount};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No account is stored under this id.
    #[error("uuid not found")]
    AccountNotFound { id: AccountId },

    /// Credits and reservations are refused for inactive accounts.
    #[error("status is inactive")]
    AccountInactive { id: AccountId },

    /// `hold + value` would exceed the balance.
    #[error("balance too low")]
    InsufficientFunds {
        id: AccountId,
        balance: Amount,
        hold: Amount,
        requested: Amount,
    },

    /// A credit would overflow the balance.
    #[error("balance overflow")]
    BalanceOverflow { id: AccountId },

    /// An account with this id is already stored.
    #[error("account already exists: {id}")]
    AccountExists { id: AccountId },

    /// The account breaks a ledger invariant (e.g. `hold > balance`).
    #[error("invalid account {id}: {reason}")]
    InvalidAccount { id: AccountId, reason: String },

    /// The key-value store failed.
    #[error("storage error: {0}")]
    Storage(#[from] KVStoreError),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

impl LedgerError {
    /// True if the error is caused by the request rather than the backend.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            LedgerError::Storage(_) | LedgerError::Serialization(_)
        )
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Serialization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SerializationError {
    pub message: String,
}
