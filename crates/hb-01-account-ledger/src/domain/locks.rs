//! # Row Locks
//!
//! Per-account async mutexes serializing read-modify-write cycles.
//!
//! ## Registry Lifecycle
//!
//! ```text
//! lock(id) ──register──→ users += 1 ──await mutex──→ RowGuard
//!                                                      │ drop
//!                                                      ↓
//!                         users -= 1 ──(users == 0)──→ entry removed
//! ```
//!
//! The registration is taken before awaiting the mutex and released on drop,
//! so a request cancelled while waiting still leaves the registry clean.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::AccountId;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

struct RowSlot {
    lock: Arc<Mutex<()>>,
    users: usize,
}

/// Registry of per-account locks.
#[derive(Default)]
pub struct RowLocks {
    rows: DashMap<AccountId, RowSlot>,
}

impl RowLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    pub async fn lock(&self, id: &AccountId) -> RowGuard<'_> {
        let registration = self.register(id);
        let guard = Arc::clone(&registration.lock).lock_owned().await;
        RowGuard {
            _guard: guard,
            _registration: registration,
        }
    }

    /// Number of accounts that currently have a holder or a waiter.
    pub fn active_rows(&self) -> usize {
        self.rows.len()
    }

    fn register(&self, id: &AccountId) -> Registration<'_> {
        let mut slot = self.rows.entry(id.clone()).or_insert_with(|| RowSlot {
            lock: Arc::new(Mutex::new(())),
            users: 0,
        });
        slot.users += 1;
        let lock = Arc::clone(&slot.lock);
        drop(slot);

        Registration {
            registry: self,
            id: id.clone(),
            lock,
        }
    }

    fn release(&self, id: &AccountId) {
        if let Entry::Occupied(mut entry) = self.rows.entry(id.clone()) {
            let slot = entry.get_mut();
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                entry.remove();
            }
        }
    }
}

struct Registration<'a> {
    registry: &'a RowLocks,
    id: AccountId,
    lock: Arc<Mutex<()>>,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.id);
    }
}

/// Exclusive access to one account row.
///
/// Field order matters: the mutex is released before the registration.
pub struct RowGuard<'a> {
    _guard: OwnedMutexGuard<()>,
    _registration: Registration<'a>,
}
