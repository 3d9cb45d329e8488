//! # Adapters Module
//!
//! In-process implementations of the outbound ports.

pub mod storage;

pub use storage::{FileBackedKVStore, InMemoryKVStore};
