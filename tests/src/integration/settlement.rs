//! # Settlement Flows
//!
//! Holds reserved over HTTP are debited by the settlement task, and
//! requests keep being served while a pass runs.

#[cfg(test)]
mod tests {
    use crate::harness::{account, account_with, TestNode};
    use hb_01_account_ledger::{run_settlement_loop, AccountLedgerApi};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;

    async fn wait_for_hold(node: &TestNode, uuid: &str, hold: u64) -> serde_json::Value {
        for _ in 0..200 {
            let status = node.status(uuid).await;
            if status["addition"]["hold"] == hold {
                return status;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("hold of {uuid} never reached {hold}");
    }

    #[tokio::test]
    async fn test_settlement_debits_reserved_funds() {
        let node = TestNode::start(vec![account("payer", 100), account("idle", 5)]).await;
        assert_eq!(node.subtract("payer", 30).await["status"], 200);
        assert_eq!(node.subtract("payer", 20).await["status"], 200);

        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(run_settlement_loop(
            Arc::clone(&node.ledger),
            Duration::from_millis(25),
            rx,
        ));

        let status = wait_for_hold(&node, "payer", 0).await;
        assert_eq!(status["addition"], json!({"balance": 50, "hold": 0, "status": true}));

        let idle = node.status("idle").await;
        assert_eq!(idle["addition"]["balance"], 5);

        // Freed funds can be reserved again.
        assert_eq!(node.subtract("payer", 50).await["status"], 200);
        assert_eq!(node.subtract("payer", 1).await["status"], 403);

        tx.send(true).unwrap();
        task.await.unwrap();
        node.stop().await;
    }

    #[tokio::test]
    async fn test_inactive_account_still_settles() {
        let node = TestNode::start(vec![account_with("closed", 80, 30, false)]).await;

        let report = node.ledger.settle_holds().await.unwrap();
        assert_eq!(report.settled, 1);
        assert_eq!(report.total_settled, 30);

        let status = node.status("closed").await;
        assert_eq!(status["addition"], json!({"balance": 50, "hold": 0, "status": false}));

        node.stop().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_requests_during_settlement_keep_invariant() {
        let accounts = (0..20).map(|i| account(&format!("s-{i}"), 1_000)).collect();
        let node = Arc::new(TestNode::start(accounts).await);

        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(run_settlement_loop(
            Arc::clone(&node.ledger),
            Duration::from_millis(5),
            rx,
        ));

        let mut handles = Vec::new();
        for i in 0..20 {
            let node = Arc::clone(&node);
            handles.push(tokio::spawn(async move {
                let uuid = format!("s-{i}");
                for _ in 0..10 {
                    node.subtract(&uuid, 15).await;
                    node.add(&uuid, 5).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        tx.send(true).unwrap();
        task.await.unwrap();
        node.ledger.settle_holds().await.unwrap();

        // Every subtract fits, so each account nets 1000 + 50 - 150.
        for i in 0..20 {
            let status = node.status(&format!("s-{i}")).await;
            assert_eq!(status["addition"]["balance"], 900);
            assert_eq!(status["addition"]["hold"], 0);
        }

        let node = Arc::try_unwrap(node).ok().unwrap();
        node.stop().await;
    }
}
