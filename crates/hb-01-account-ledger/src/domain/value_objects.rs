//! # Value Objects
//!
//! Storage key layout and operation reports.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount};

/// Key prefixes for the key-value store.
///
/// All keys are prefixed to namespace different record types.
#[derive(Debug, Clone, Copy)]
pub enum KeyPrefix {
    /// Account record: `acct:{id}` -> Account
    Account,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Account => b"acct:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Build an account key from an id.
    pub fn account_key(id: &AccountId) -> Vec<u8> {
        KeyPrefix::Account.key(id.as_ref())
    }
}

/// Outcome of one settlement pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Accounts visited.
    pub scanned: usize,
    /// Accounts whose hold was non-zero and got debited.
    pub settled: usize,
    /// Sum of all debited holds.
    pub total_settled: Amount,
}
