//! # Account Ledger (hb-01)
//!
//! The Account Ledger is the authoritative store for account balances and
//! holds. It implements a two-phase debit:
//!
//! ```text
//! add(value)       ──→ balance += value                  (immediate)
//! subtract(value)  ──→ hold += value  if hold + value <= balance
//!                                │
//!          every HOLD_UPDATE_INTERVAL (settlement task)
//!                                ↓
//!                      balance -= hold; hold = 0
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Covered Holds | `hold <= balance` for every stored account |
//! | 2 | No Wrapping | Arithmetic is checked; overflow is rejected |
//! | 3 | Row Serialization | Read-modify-write on one account is serialized |
//! | 4 | Bounded Lock Registry | Lock entries exist only while held or awaited |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Rules, errors, value objects, row locks
//! - `ports/` - Port traits (inbound API, outbound store and codec)
//! - `adapters/` - In-memory and file-backed stores
//! - `service/` - Application service implementing the API
//! - `settlement` - Periodic hold settlement task
//!
//! ## Usage
//!
//! ```ignore
//! use hb_01_account_ledger::{AccountLedgerApi, AccountLedgerService};
//!
//! let ledger = AccountLedgerService::new_in_memory();
//! ledger.open_account(NewAccount::active(id.clone(), "Alice", 100)).await?;
//! ledger.subtract(&id, 40).await?;
//! ledger.settle_holds().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod settlement;

pub use adapters::{FileBackedKVStore, InMemoryKVStore};
pub use domain::errors::{KVStoreError, LedgerError, SerializationError};
pub use domain::value_objects::{KeyPrefix, SettlementReport};
pub use domain::{subtraction_is_possible, RowLocks};
pub use ports::inbound::AccountLedgerApi;
pub use ports::outbound::{AccountCodec, BatchOperation, BincodeAccountCodec, KeyValueStore};
pub use service::AccountLedgerService;
pub use settlement::{
    run_settlement_loop, DEFAULT_HOLD_UPDATE_INTERVAL, MAX_HOLD_UPDATE_INTERVAL,
    SETTLEMENT_BATCH_SIZE,
};
