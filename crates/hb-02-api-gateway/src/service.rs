//! API Gateway service - main entry point.
//!
//! Owns the HTTP server and its graceful shutdown.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::handlers::{
    handle_add, handle_ping, handle_status, handle_subtract, health_check, metrics, AppState,
};
use crate::middleware::{GatewayMetrics, MiddlewareStack};
use axum::{
    routing::{get, post},
    Router,
};
use hb_01_account_ledger::AccountLedgerApi;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tracing::info;

/// API Gateway service state
pub struct ApiGatewayService {
    config: Arc<GatewayConfig>,
    ledger: Arc<dyn AccountLedgerApi>,
    metrics: Arc<GatewayMetrics>,
    shutdown_tx: watch::Sender<bool>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        ledger: Arc<dyn AccountLedgerApi>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;

        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            config: Arc::new(config),
            ledger,
            metrics: Arc::new(GatewayMetrics::new()),
            shutdown_tx,
        })
    }

    /// Bind the configured address and serve until [`shutdown`](Self::shutdown).
    pub async fn start(&self) -> Result<(), GatewayError> {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until [`shutdown`](Self::shutdown).
    pub async fn serve(&self, listener: TcpListener) -> Result<(), GatewayError> {
        let local_addr = listener.local_addr()?;
        info!(
            addr = %local_addr,
            name = %self.config.instance_name,
            "API Gateway listening"
        );

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                // A dropped sender also ends serving.
                let _ = shutdown_rx.wait_for(|stopped| *stopped).await;
            })
            .await?;

        info!("API Gateway stopped");
        Ok(())
    }

    /// Trigger graceful shutdown; in-flight requests are allowed to finish.
    pub fn shutdown(&self) {
        info!("Received shutdown signal");
        self.shutdown_tx.send_replace(true);
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the HTTP router with its middleware stack.
    pub fn router(&self) -> Router {
        let state = AppState {
            ledger: Arc::clone(&self.ledger),
            metrics: Arc::clone(&self.metrics),
            config: Arc::clone(&self.config),
        };

        let stack = MiddlewareStack::from_config(&self.config, Arc::clone(&self.metrics));
        let middleware = ServiceBuilder::new()
            .layer(stack.tracing)
            .layer(stack.timeout);

        Router::new()
            .route("/api/ping", post(handle_ping))
            .route("/api/status", post(handle_status))
            .route("/api/add", post(handle_add))
            .route("/api/subtract", post(handle_subtract))
            .route("/health", get(health_check))
            .route("/metrics", get(metrics))
            .layer(stack.body_limit)
            .layer(middleware)
            .with_state(state)
    }
}
