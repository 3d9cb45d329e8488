//! # Account Seeding
//!
//! Provisions accounts from a JSON file at startup:
//!
//! ```json
//! [
//!   {"uuid": "6f1c...", "name": "Alice", "balance": 1000, "hold": 0, "status": true}
//! ]
//! ```
//!
//! Accounts already present in the store are left untouched, so the same
//! file can be applied on every start.

use hb_01_account_ledger::{AccountLedgerApi, LedgerError};
use shared_types::NewAccount;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Seed loading errors.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("seeding failed: {0}")]
    Ledger(#[from] LedgerError),
}

/// Outcome of applying a seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Accounts created.
    pub opened: usize,
    /// Accounts that already existed.
    pub skipped: usize,
}

/// Read the accounts listed in `path`.
pub fn load_seed_file(path: &Path) -> Result<Vec<NewAccount>, SeedError> {
    let bytes = std::fs::read(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Open every account in `accounts` that does not exist yet.
///
/// Any failure other than an existing account aborts seeding.
pub async fn apply_seed<L>(ledger: &L, accounts: Vec<NewAccount>) -> Result<SeedReport, SeedError>
where
    L: AccountLedgerApi + ?Sized,
{
    let mut report = SeedReport::default();

    for account in accounts {
        let id = account.id.clone();
        match ledger.open_account(account).await {
            Ok(_) => report.opened += 1,
            Err(LedgerError::AccountExists { .. }) => {
                debug!(account = %id, "Seed account already exists, skipping");
                report.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        opened = report.opened,
        skipped = report.skipped,
        "Seed accounts applied"
    );
    Ok(report)
}
