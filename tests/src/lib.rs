//! # Hold-Balance Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Gateway on an ephemeral port + HTTP client
//! └── integration/      # End-to-end flows over HTTP
//!     ├── http_api.rs
//!     ├── concurrency.rs
//!     ├── settlement.rs
//!     └── persistence.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p hb-tests
//!
//! # Benchmarks
//! cargo bench -p hb-tests
//! ```

pub mod harness;
pub mod integration;
