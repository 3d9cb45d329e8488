//! # Integration Tests
//!
//! Full HTTP round trips against a running gateway.

pub mod concurrency;
pub mod http_api;
pub mod persistence;
pub mod settlement;
