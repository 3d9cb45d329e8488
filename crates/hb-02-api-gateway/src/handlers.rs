//! HTTP handlers.
//!
//! The API routes read the raw body so that every malformed request is
//! answered with a `400` envelope rather than an extractor rejection.

use crate::domain::config::GatewayConfig;
use crate::domain::envelope::{parse_amount_request, parse_status_request, Envelope};
use crate::domain::error::{ApiError, ApiResult};
use crate::middleware::{GatewayMetrics, Operation, RequestTimer};
use axum::{body::Bytes, extract::State, response::Response, Json};
use hb_01_account_ledger::{AccountLedgerApi, LedgerError};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn AccountLedgerApi>,
    pub metrics: Arc<GatewayMetrics>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    fn respond(&self, timer: RequestTimer, result: ApiResult<Value>) -> Response {
        let envelope = Envelope::from(result);
        timer.finish(envelope.status);
        envelope.into_http_response(self.config.responses.mirror_http_status)
    }
}

/// `POST /api/ping`
pub async fn handle_ping(State(state): State<AppState>) -> Response {
    let timer = RequestTimer::new(Arc::clone(&state.metrics), Operation::Ping);
    state.respond(timer, Ok(json!({})))
}

/// `POST /api/status`
pub async fn handle_status(State(state): State<AppState>, body: Bytes) -> Response {
    let timer = RequestTimer::new(Arc::clone(&state.metrics), Operation::Status);
    let result: ApiResult<Value> = async {
        let request = parse_status_request(&body)?;
        let account = state
            .ledger
            .status(&request.uuid)
            .await
            .map_err(|e| ledger_failure("status", e))?;
        Ok(json!(account.snapshot()))
    }
    .await;
    state.respond(timer, result)
}

/// `POST /api/add`
pub async fn handle_add(State(state): State<AppState>, body: Bytes) -> Response {
    let timer = RequestTimer::new(Arc::clone(&state.metrics), Operation::Add);
    let result: ApiResult<Value> = async {
        let request = parse_amount_request(&body)?;
        state
            .ledger
            .add(&request.uuid, request.value)
            .await
            .map_err(|e| ledger_failure("add", e))?;
        Ok(json!({}))
    }
    .await;
    state.respond(timer, result)
}

/// `POST /api/subtract`
pub async fn handle_subtract(State(state): State<AppState>, body: Bytes) -> Response {
    let timer = RequestTimer::new(Arc::clone(&state.metrics), Operation::Subtract);
    let result: ApiResult<Value> = async {
        let request = parse_amount_request(&body)?;
        state
            .ledger
            .subtract(&request.uuid, request.value)
            .await
            .map_err(|e| ledger_failure("subtract", e))?;
        Ok(json!({}))
    }
    .await;
    state.respond(timer, result)
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let accounts = match state.ledger.account_count().await {
        Ok(n) => json!(n),
        Err(e) => {
            error!(error = %e, "health check could not count accounts");
            Value::Null
        }
    };
    Json(json!({
        "status": "ok",
        "name": state.config.instance_name,
        "version": crate::VERSION,
        "accounts": accounts,
    }))
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> Json<Value> {
    Json(state.metrics.to_json())
}

fn ledger_failure(operation: &str, err: LedgerError) -> ApiError {
    if err.is_rejection() {
        debug!(operation, reason = %err, "request rejected");
    } else {
        error!(operation, error = %err, "ledger failure");
    }
    ApiError::from(err)
}
