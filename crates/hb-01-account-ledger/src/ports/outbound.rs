//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Account Ledger service.
//!
//! These are the interfaces this library requires the host application to
//! implement. In-process adapters live in `crate::adapters`; the RocksDB
//! adapter lives in node-runtime.

use crate::domain::errors::{KVStoreError, SerializationError};
use shared_types::Account;

/// Abstract interface for key-value database operations.
///
/// Production: `RocksDbStore` (node-runtime/adapters/storage/rocksdb_adapter.rs)
/// or `FileBackedKVStore`. Testing: `InMemoryKVStore`.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Iterate over keys with a prefix.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;

    /// Count keys with a prefix without copying their values.
    fn count_prefix(&self, prefix: &[u8]) -> Result<usize, KVStoreError>;
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        (**self).put(key, value)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        (**self).atomic_batch_write(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        (**self).exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        (**self).prefix_scan(prefix)
    }

    fn count_prefix(&self, prefix: &[u8]) -> Result<usize, KVStoreError> {
        (**self).count_prefix(prefix)
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Abstract interface for account record encoding.
pub trait AccountCodec: Send + Sync {
    /// Serialize an account to bytes.
    fn encode(&self, account: &Account) -> Result<Vec<u8>, SerializationError>;

    /// Deserialize bytes to an account.
    fn decode(&self, data: &[u8]) -> Result<Account, SerializationError>;
}

/// Default account codec using bincode.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeAccountCodec;

impl AccountCodec for BincodeAccountCodec {
    fn encode(&self, account: &Account) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(account).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn decode(&self, data: &[u8]) -> Result<Account, SerializationError> {
        bincode::deserialize(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}
