//! # Test Harness
//!
//! Starts a real gateway on `127.0.0.1:0` over an in-memory ledger and
//! talks to it with `reqwest`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hb_01_account_ledger::{AccountLedgerApi, AccountLedgerService, InMemoryKVStore};
use hb_02_api_gateway::{ApiGatewayService, GatewayConfig, GatewayError};
use serde_json::{json, Value};
use shared_types::{AccountId, Amount, NewAccount};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Ledger type used by the harness.
pub type TestLedger = AccountLedgerService<InMemoryKVStore>;

/// A running gateway plus a client pointed at it.
pub struct TestNode {
    pub addr: SocketAddr,
    pub ledger: Arc<TestLedger>,
    pub client: reqwest::Client,
    gateway: Arc<ApiGatewayService>,
    server: JoinHandle<Result<(), GatewayError>>,
}

impl TestNode {
    /// Start with default gateway settings.
    pub async fn start(accounts: Vec<NewAccount>) -> Self {
        Self::start_with(GatewayConfig::default(), accounts).await
    }

    /// Start with `config`; host and port are overridden by the ephemeral bind.
    pub async fn start_with(config: GatewayConfig, accounts: Vec<NewAccount>) -> Self {
        let ledger = Arc::new(AccountLedgerService::new_in_memory());
        for account in accounts {
            ledger.open_account(account).await.expect("open account");
        }

        let ledger_api: Arc<dyn AccountLedgerApi> = ledger.clone();
        let gateway = Arc::new(ApiGatewayService::new(config, ledger_api).expect("gateway"));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let server = {
            let gateway = Arc::clone(&gateway);
            tokio::spawn(async move { gateway.serve(listener).await })
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("client");

        Self {
            addr,
            ledger,
            client,
            gateway,
            server,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a raw body and return the response.
    pub async fn post_raw(&self, path: &str, body: impl Into<reqwest::Body>) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .body(body)
            .send()
            .await
            .expect("request")
    }

    /// POST a JSON body and decode the envelope.
    pub async fn post(&self, path: &str, body: Value) -> Value {
        self.post_raw(path, body.to_string())
            .await
            .json()
            .await
            .expect("envelope")
    }

    /// GET a JSON document.
    pub async fn get(&self, path: &str) -> Value {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json")
    }

    pub async fn status(&self, uuid: &str) -> Value {
        self.post("/api/status", json!({"addition": {"uuid": uuid}}))
            .await
    }

    pub async fn add(&self, uuid: &str, value: Amount) -> Value {
        self.post("/api/add", amount_body(uuid, value)).await
    }

    pub async fn subtract(&self, uuid: &str, value: Amount) -> Value {
        self.post("/api/subtract", amount_body(uuid, value)).await
    }

    /// Shut the gateway down and wait for the server task.
    pub async fn stop(self) {
        self.gateway.shutdown();
        let result = tokio::time::timeout(Duration::from_secs(5), self.server)
            .await
            .expect("server stops in time")
            .expect("server task");
        result.expect("server result");
    }
}

/// Request body for `/api/add` and `/api/subtract`.
pub fn amount_body(uuid: &str, value: Amount) -> Value {
    json!({"status": 200, "result": true, "addition": {"uuid": uuid, "value": value}, "description": {}})
}

/// An active account with no hold.
pub fn account(uuid: &str, balance: Amount) -> NewAccount {
    NewAccount::active(AccountId::new(uuid).expect("non-empty id"), uuid, balance)
}

/// An account with explicit hold and status.
pub fn account_with(uuid: &str, balance: Amount, hold: Amount, active: bool) -> NewAccount {
    NewAccount {
        hold,
        active,
        ..account(uuid, balance)
    }
}
