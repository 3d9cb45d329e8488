//! # Core Domain Entities
//!
//! The account model shared by every crate in the workspace.
//!
//! ## Invariants
//!
//! - `hold <= balance` for every stored account
//! - amounts are unsigned; arithmetic on them must be checked by callers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AccountIdError;

/// Monetary amount in minor units.
pub type Amount = u64;

/// Identifier of an account (the `uuid` field of API requests).
///
/// Any non-empty string is accepted; the value is not required to be an
/// RFC 4122 UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create an identifier, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, AccountIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AccountIdError::Empty);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier.
    pub id: AccountId,
    /// Display name of the owner.
    pub name: String,
    /// Settled funds.
    pub balance: Amount,
    /// Funds reserved by `subtract` and not yet debited.
    pub hold: Amount,
    /// Inactive accounts reject credits and reservations.
    pub active: bool,
}

impl Account {
    /// Funds that can still be reserved.
    pub fn available(&self) -> Amount {
        self.balance.saturating_sub(self.hold)
    }

    /// Public view of the account as returned by the status endpoint.
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            balance: self.balance,
            hold: self.hold,
            status: self.active,
        }
    }
}

/// Request to provision a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    /// Account identifier, stored as `uuid` in seed files.
    #[serde(rename = "uuid")]
    pub id: AccountId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub balance: Amount,
    #[serde(default)]
    pub hold: Amount,
    /// Stored as `status` in seed files; defaults to active.
    #[serde(rename = "status", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewAccount {
    /// An active account with the given opening balance and no hold.
    pub fn active(id: AccountId, name: impl Into<String>, balance: Amount) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            hold: 0,
            active: true,
        }
    }

    pub fn into_account(self) -> Account {
        Account {
            id: self.id,
            name: self.name,
            balance: self.balance,
            hold: self.hold,
            active: self.active,
        }
    }
}

/// Balance, hold and status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub balance: Amount,
    pub hold: Amount,
    pub status: bool,
}
