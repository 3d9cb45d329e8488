//! # Persistence Flows
//!
//! Balances and holds written through a file-backed node survive a
//! restart of the node.

#[cfg(test)]
mod tests {
    use hb_01_account_ledger::AccountLedgerApi;
    use node_runtime::container::StorageBackend;
    use node_runtime::seed::apply_seed;
    use node_runtime::{NodeConfig, NodeRuntime, ServiceContainer};
    use serde_json::json;
    use shared_types::{AccountId, NewAccount};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn file_config(dir: &std::path::Path) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.data_dir = dir.to_path_buf();
        config.settlement.enabled = false;
        config
    }

    fn id(s: &str) -> AccountId {
        AccountId::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let container = ServiceContainer::new(file_config(dir.path())).unwrap();
            let ledger = container.ledger_api();
            ledger
                .open_account(NewAccount::active(id("keep"), "Keeper", 100))
                .await
                .unwrap();
            ledger.add(&id("keep"), 25).await.unwrap();
            ledger.subtract(&id("keep"), 40).await.unwrap();
        }

        let container = ServiceContainer::new(file_config(dir.path())).unwrap();
        let account = container.ledger_api().status(&id("keep")).await.unwrap();
        assert_eq!((account.balance, account.hold, account.active), (125, 40, true));
    }

    #[tokio::test]
    async fn test_reseeding_keeps_existing_balances() {
        let dir = tempfile::tempdir().unwrap();
        let seed = vec![NewAccount::active(id("seeded"), "Seed", 10)];

        {
            let container = ServiceContainer::new(file_config(dir.path())).unwrap();
            let report = apply_seed(container.ledger.as_ref(), seed.clone()).await.unwrap();
            assert_eq!(report.opened, 1);
            container.ledger_api().add(&id("seeded"), 5).await.unwrap();
        }

        let container = ServiceContainer::new(file_config(dir.path())).unwrap();
        let report = apply_seed(container.ledger.as_ref(), seed).await.unwrap();
        assert_eq!(report.skipped, 1);
        let account = container.ledger_api().status(&id("seeded")).await.unwrap();
        assert_eq!(account.balance, 15);
    }

    #[tokio::test]
    async fn test_http_writes_survive_runtime_restart() {
        let dir = tempfile::tempdir().unwrap();
        let client = reqwest::Client::new();

        for (round, expected_balance) in [(0, 60), (1, 120)] {
            let runtime = Arc::new(NodeRuntime::new(file_config(dir.path())).unwrap());
            if round == 0 {
                runtime
                    .container()
                    .ledger_api()
                    .open_account(NewAccount::active(id("http"), "H", 0))
                    .await
                    .unwrap();
            }

            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let server = {
                let runtime = Arc::clone(&runtime);
                tokio::spawn(async move { runtime.serve(listener).await })
            };

            let body = json!({"addition": {"uuid": "http", "value": 60}});
            let mut envelope = serde_json::Value::Null;
            for _ in 0..100 {
                match client
                    .post(format!("http://{addr}/api/add"))
                    .body(body.to_string())
                    .send()
                    .await
                {
                    Ok(response) => {
                        envelope = response.json().await.unwrap();
                        break;
                    }
                    Err(_) => tokio::time::sleep(Duration::from_millis(10)).await,
                }
            }
            assert_eq!(envelope["status"], 200);

            let account = runtime.container().ledger_api().status(&id("http")).await.unwrap();
            assert_eq!(account.balance, expected_balance);

            runtime.shutdown().await;
            server.await.unwrap().unwrap();
        }
    }
}
