//! # Error Types
//!
//! Validation errors for shared entities.

use thiserror::Error;

/// Errors raised when constructing an [`AccountId`](crate::AccountId).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountIdError {
    /// The identifier was an empty string.
    #[error("account id must not be empty")]
    Empty,
}
