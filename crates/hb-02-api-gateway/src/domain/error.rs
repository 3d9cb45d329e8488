//! API Gateway error types.
//!
//! Every failure reaching a client is an [`ApiError`]: an envelope status
//! code plus the `reason` string placed in the envelope `addition`.

use crate::domain::config::ConfigError;
use hb_01_account_ledger::LedgerError;
use std::net::SocketAddr;
use thiserror::Error;

/// Envelope status codes
pub mod codes {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const OPERATION_NOT_POSSIBLE: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_ERROR: u16 = 500;
    pub const TIMEOUT: u16 = 504;
}

/// Client-visible error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {reason}")]
pub struct ApiError {
    /// Envelope status code
    pub status: u16,
    /// Value of `addition.reason`
    pub reason: String,
}

impl ApiError {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    /// Malformed body, missing fields, or wrong field types
    pub fn bad_request() -> Self {
        Self::new(codes::BAD_REQUEST, "bad request")
    }

    /// Unknown account
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::new(codes::NOT_FOUND, reason)
    }

    /// Request understood but refused by the ledger
    pub fn operation_not_possible(reason: impl Into<String>) -> Self {
        Self::new(codes::OPERATION_NOT_POSSIBLE, reason)
    }

    /// Backend failure; details stay in the logs
    pub fn internal() -> Self {
        Self::new(codes::INTERNAL_ERROR, "internal error")
    }

    /// Request exceeded the configured timeout
    pub fn timeout() -> Self {
        Self::new(codes::TIMEOUT, "request timed out")
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::AccountNotFound { .. } => ApiError::not_found(err.to_string()),
            LedgerError::AccountInactive { .. }
            | LedgerError::InsufficientFunds { .. }
            | LedgerError::BalanceOverflow { .. }
            | LedgerError::AccountExists { .. }
            | LedgerError::InvalidAccount { .. } => {
                ApiError::operation_not_possible(err.to_string())
            }
            LedgerError::Storage(_) | LedgerError::Serialization(_) => ApiError::internal(),
        }
    }
}

/// Result alias for handler logic
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway lifecycle errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
