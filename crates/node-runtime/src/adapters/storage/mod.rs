//! # Storage Backends
//!
//! Opens the ledger store selected by `HB_STORAGE_BACKEND`.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to use the RocksDB backend:
//!
//! ```toml
//! node-runtime = { path = "...", features = ["rocksdb"] }
//! ```

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

pub use hb_01_account_ledger::{FileBackedKVStore, InMemoryKVStore};

use crate::container::config::{StorageBackend, StorageConfig};
use hb_01_account_ledger::{KVStoreError, KeyValueStore};
use tracing::info;

/// File name of the snapshot used by the file backend.
pub const LEDGER_FILE: &str = "ledger.kv";

/// Directory name used by the RocksDB backend.
pub const ROCKSDB_DIR: &str = "rocksdb";

/// Store type chosen at runtime.
pub type DynStore = Box<dyn KeyValueStore>;

/// Open the configured backend, creating the data directory if needed.
pub fn open_store(config: &StorageConfig) -> Result<DynStore, KVStoreError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on exit");
            Ok(Box::new(InMemoryKVStore::new()))
        }
        StorageBackend::File => {
            create_data_dir(config)?;
            let path = config.data_dir.join(LEDGER_FILE);
            Ok(Box::new(FileBackedKVStore::open(path)?))
        }
        #[cfg(feature = "rocksdb")]
        StorageBackend::RocksDb => {
            create_data_dir(config)?;
            Ok(Box::new(RocksDbStore::open_default(
                config.data_dir.join(ROCKSDB_DIR),
            )?))
        }
        #[cfg(not(feature = "rocksdb"))]
        StorageBackend::RocksDb => Err(KVStoreError::IOError {
            message: "rocksdb backend not compiled in".into(),
        }),
    }
}

fn create_data_dir(config: &StorageConfig) -> Result<(), KVStoreError> {
    std::fs::create_dir_all(&config.data_dir).map_err(|e| KVStoreError::IOError {
        message: format!(
            "cannot create data dir {}: {}",
            config.data_dir.display(),
            e
        ),
    })
}
