//! # Account Ledger Service
//!
//! The main service implementing the Account Ledger API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `AccountLedgerApi` for the gateway and the runtime
//! 2. Serializes read-modify-write cycles per account through `RowLocks`
//! 3. Keeps every store access inside a short `parking_lot` critical
//!    section that never spans an `.await`
//! 4. Uses dependency injection for the store and the record codec

mod ledger;

use crate::adapters::InMemoryKVStore;
use crate::domain::errors::LedgerError;
use crate::domain::locks::RowLocks;
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::{AccountCodec, BincodeAccountCodec, KeyValueStore};
use parking_lot::RwLock;
use shared_types::{Account, AccountId};

/// The Account Ledger Service.
pub struct AccountLedgerService<KV, C = BincodeAccountCodec>
where
    KV: KeyValueStore,
    C: AccountCodec,
{
    /// Key-value store for persistence.
    pub(crate) store: RwLock<KV>,
    /// Account record codec.
    pub(crate) codec: C,
    /// Per-account locks.
    pub(crate) rows: RowLocks,
}

impl<KV: KeyValueStore> AccountLedgerService<KV> {
    /// Create a service over `store` with the default bincode codec.
    pub fn new(store: KV) -> Self {
        Self::with_codec(store, BincodeAccountCodec)
    }
}

impl AccountLedgerService<InMemoryKVStore> {
    /// Create a service backed by an in-memory store.
    pub fn new_in_memory() -> Self {
        Self::new(InMemoryKVStore::new())
    }
}

impl<KV, C> AccountLedgerService<KV, C>
where
    KV: KeyValueStore,
    C: AccountCodec,
{
    pub fn with_codec(store: KV, codec: C) -> Self {
        Self {
            store: RwLock::new(store),
            codec,
            rows: RowLocks::new(),
        }
    }

    /// Accounts that currently have a lock holder or waiter.
    pub fn active_rows(&self) -> usize {
        self.rows.active_rows()
    }

    pub(crate) fn load(&self, id: &AccountId) -> Result<Option<Account>, LedgerError> {
        let bytes = self.store.read().get(&KeyPrefix::account_key(id))?;
        bytes
            .map(|b| self.codec.decode(&b).map_err(LedgerError::from))
            .transpose()
    }

    pub(crate) fn load_existing(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.load(id)?
            .ok_or_else(|| LedgerError::AccountNotFound { id: id.clone() })
    }

    pub(crate) fn save(&self, account: &Account) -> Result<(), LedgerError> {
        let bytes = self.codec.encode(account)?;
        self.store
            .write()
            .put(&KeyPrefix::account_key(&account.id), &bytes)?;
        Ok(())
    }

    /// Ids of every stored account, in key order.
    pub(crate) fn account_ids(&self) -> Result<Vec<AccountId>, LedgerError> {
        let records = self
            .store
            .read()
            .prefix_scan(KeyPrefix::Account.as_bytes())?;
        records
            .iter()
            .map(|(_, value)| {
                self.codec
                    .decode(value)
                    .map(|account| account.id)
                    .map_err(LedgerError::from)
            })
            .collect()
    }
}
