//! Request counters exposed by `GET /metrics`.

use crate::domain::error::codes;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// API operations counted separately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ping,
    Status,
    Add,
    Subtract,
}

/// API Gateway metrics
#[derive(Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,

    // Per-operation counters
    pub ping_requests: AtomicU64,
    pub status_requests: AtomicU64,
    pub add_requests: AtomicU64,
    pub subtract_requests: AtomicU64,

    // Failures by envelope status
    pub bad_requests: AtomicU64,
    pub not_found: AtomicU64,
    pub rejected: AtomicU64,
    pub internal_errors: AtomicU64,
    pub timeouts: AtomicU64,

    pub total_latency_ms: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished API request
    pub fn record_request(&self, operation: Operation, status: u16, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        let per_operation = match operation {
            Operation::Ping => &self.ping_requests,
            Operation::Status => &self.status_requests,
            Operation::Add => &self.add_requests,
            Operation::Subtract => &self.subtract_requests,
        };
        per_operation.fetch_add(1, Ordering::Relaxed);

        if status == codes::OK {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.record_failure(status);
        }

        self.total_latency_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
        self.request_count_for_latency
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request cut off by the timeout layer
    pub fn record_timeout(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.record_failure(codes::TIMEOUT);
    }

    fn record_failure(&self, status: u16) {
        self.requests_error.fetch_add(1, Ordering::Relaxed);
        let bucket = match status {
            codes::BAD_REQUEST => &self.bad_requests,
            codes::NOT_FOUND => &self.not_found,
            codes::OPERATION_NOT_POSSIBLE => &self.rejected,
            codes::TIMEOUT => &self.timeouts,
            _ => &self.internal_errors,
        };
        bucket.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
            },
            "operations": {
                "ping": self.ping_requests.load(Ordering::Relaxed),
                "status": self.status_requests.load(Ordering::Relaxed),
                "add": self.add_requests.load(Ordering::Relaxed),
                "subtract": self.subtract_requests.load(Ordering::Relaxed),
            },
            "failures": {
                "bad_request": self.bad_requests.load(Ordering::Relaxed),
                "not_found": self.not_found.load(Ordering::Relaxed),
                "rejected": self.rejected.load(Ordering::Relaxed),
                "internal": self.internal_errors.load(Ordering::Relaxed),
                "timeout": self.timeouts.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
    operation: Operation,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>, operation: Operation) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            operation,
        }
    }

    pub fn finish(self, status: u16) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.metrics
            .record_request(self.operation, status, latency_ms);
    }
}
