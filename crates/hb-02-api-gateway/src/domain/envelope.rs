//! Request and response envelopes.
//!
//! Every API call exchanges the same JSON shape:
//!
//! ```json
//! {"status": 200, "result": true, "addition": {...}, "description": {}}
//! ```
//!
//! Requests carry their arguments in `addition`; responses carry either the
//! operation result or `{"reason": "..."}` there.

use crate::domain::error::{codes, ApiError, ApiResult};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use shared_types::{AccountId, Amount};

/// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    pub result: bool,
    pub addition: Value,
    pub description: Value,
}

impl Envelope {
    /// Successful envelope carrying `addition`
    pub fn ok(addition: Value) -> Self {
        Self {
            status: codes::OK,
            result: true,
            addition,
            description: json!({}),
        }
    }

    /// Failure envelope for `err`
    pub fn error(err: &ApiError) -> Self {
        Self {
            status: err.status,
            result: false,
            addition: json!({ "reason": err.reason }),
            description: json!({}),
        }
    }

    /// HTTP status to send this envelope with.
    pub fn http_status(&self, mirror: bool) -> StatusCode {
        if !mirror {
            return StatusCode::OK;
        }
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Encode as a JSON HTTP response.
    pub fn into_http_response(self, mirror: bool) -> Response {
        (self.http_status(mirror), Json(self)).into_response()
    }
}

impl From<ApiResult<Value>> for Envelope {
    fn from(result: ApiResult<Value>) -> Self {
        match result {
            Ok(addition) => Envelope::ok(addition),
            Err(err) => Envelope::error(&err),
        }
    }
}

/// Arguments of `/api/status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRequest {
    pub uuid: AccountId,
}

/// Arguments of `/api/add` and `/api/subtract`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountRequest {
    pub uuid: AccountId,
    pub value: Amount,
}

/// Parse a `/api/status` body.
pub fn parse_status_request(body: &[u8]) -> ApiResult<StatusRequest> {
    let addition = addition(body)?;
    let uuid = uuid(&addition)?;
    Ok(StatusRequest { uuid })
}

/// Parse an `/api/add` or `/api/subtract` body.
///
/// `value` must be a non-negative JSON integer. It is validated before the
/// `uuid`, so a bad value on an unknown account is still a bad request.
/// Booleans are rejected rather than read as 0 or 1, even though some
/// clients serialize flags and integers interchangeably.
pub fn parse_amount_request(body: &[u8]) -> ApiResult<AmountRequest> {
    let addition = addition(body)?;
    let value = addition
        .get("value")
        .and_then(Value::as_u64)
        .ok_or_else(ApiError::bad_request)?;
    let uuid = uuid(&addition)?;
    Ok(AmountRequest { uuid, value })
}

fn addition(body: &[u8]) -> ApiResult<Map<String, Value>> {
    let request: Value = serde_json::from_slice(body).map_err(|_| ApiError::bad_request())?;
    match request {
        Value::Object(mut envelope) => match envelope.remove("addition") {
            Some(Value::Object(addition)) => Ok(addition),
            _ => Err(ApiError::bad_request()),
        },
        _ => Err(ApiError::bad_request()),
    }
}

// An empty string names no account, so it is reported like any unknown id.
fn uuid(addition: &Map<String, Value>) -> ApiResult<AccountId> {
    let raw = addition
        .get("uuid")
        .and_then(Value::as_str)
        .ok_or_else(ApiError::bad_request)?;
    AccountId::new(raw).map_err(|_| ApiError::not_found("uuid not found"))
}
