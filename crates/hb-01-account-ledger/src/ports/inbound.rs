//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Account Ledger subsystem.

use crate::domain::errors::LedgerError;
use crate::domain::value_objects::SettlementReport;
use async_trait::async_trait;
use shared_types::{Account, AccountId, Amount, NewAccount};

/// Primary API for the Account Ledger subsystem.
///
/// Implementations must serialize `add`, `subtract` and settlement per
/// account, and keep `hold <= balance` for every stored account.
#[async_trait]
pub trait AccountLedgerApi: Send + Sync {
    /// Read an account without taking its row lock.
    ///
    /// ## Errors
    ///
    /// - `AccountNotFound`: no account with this id
    async fn status(&self, id: &AccountId) -> Result<Account, LedgerError>;

    /// Credit `value` to the balance.
    ///
    /// ## Errors
    ///
    /// - `AccountNotFound`, `AccountInactive`, `BalanceOverflow`
    async fn add(&self, id: &AccountId, value: Amount) -> Result<Account, LedgerError>;

    /// Reserve `value` by growing the hold; the balance is debited at the
    /// next settlement.
    ///
    /// ## Errors
    ///
    /// - `AccountNotFound`, `AccountInactive`
    /// - `InsufficientFunds`: `hold + value > balance`
    async fn subtract(&self, id: &AccountId, value: Amount) -> Result<Account, LedgerError>;

    /// Debit every account's hold from its balance and clear the hold.
    async fn settle_holds(&self) -> Result<SettlementReport, LedgerError>;

    /// Provision a new account.
    ///
    /// ## Errors
    ///
    /// - `AccountExists`: id already stored
    /// - `InvalidAccount`: `hold > balance`
    async fn open_account(&self, account: NewAccount) -> Result<Account, LedgerError>;

    /// Number of stored accounts.
    async fn account_count(&self) -> Result<usize, LedgerError>;
}
