//! Timeout middleware.
//!
//! Bounds the time spent on one request, row lock waits included. A request
//! that runs out of time is answered with a `504` envelope; dropping the
//! handler future releases any lock it was waiting on.

use crate::domain::envelope::Envelope;
use crate::domain::error::ApiError;
use crate::middleware::metrics::GatewayMetrics;
use axum::{body::Body, http::Request, response::Response};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tower::{Layer, Service};
use tracing::warn;

/// Timeout layer
#[derive(Clone)]
pub struct TimeoutLayer {
    limit: Duration,
    mirror_http_status: bool,
    metrics: Arc<GatewayMetrics>,
}

impl TimeoutLayer {
    pub fn new(limit: Duration, mirror_http_status: bool, metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            limit,
            mirror_http_status,
            metrics,
        }
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService {
            inner,
            layer: self.clone(),
        }
    }
}

/// Timeout service
#[derive(Clone)]
pub struct TimeoutService<S> {
    inner: S,
    layer: TimeoutLayer,
}

impl<S> Service<Request<Body>> for TimeoutService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let layer = self.layer.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match timeout(layer.limit, inner.call(req)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(timeout_ms = layer.limit.as_millis() as u64, "Request timed out");
                    layer.metrics.record_timeout();
                    Ok(Envelope::error(&ApiError::timeout())
                        .into_http_response(layer.mirror_http_status))
                }
            }
        })
    }
}
