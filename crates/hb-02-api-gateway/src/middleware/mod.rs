//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Tracing → Timeout → BodyLimit → Handler

pub mod metrics;
pub mod timeout;
pub mod tracing;

pub use metrics::{GatewayMetrics, Operation, RequestTimer};
pub use timeout::TimeoutLayer;
pub use tracing::TracingLayer;

use crate::domain::config::GatewayConfig;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// Middleware stack builder
pub struct MiddlewareStack {
    pub tracing: TracingLayer,
    pub timeout: TimeoutLayer,
    pub body_limit: RequestBodyLimitLayer,
    pub metrics: Arc<GatewayMetrics>,
}

impl MiddlewareStack {
    /// Create middleware stack from gateway config
    pub fn from_config(config: &GatewayConfig, metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            tracing: TracingLayer::new(),
            timeout: TimeoutLayer::new(
                config.timeouts.request,
                config.responses.mirror_http_status,
                Arc::clone(&metrics),
            ),
            body_limit: RequestBodyLimitLayer::new(config.limits.max_request_size),
            metrics,
        }
    }

    /// Get shared metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }
}
