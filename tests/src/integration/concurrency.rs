//! # Concurrent Request Flows
//!
//! Many clients reserving against one account must never push the hold
//! past the balance, and concurrent credits must all land.

#[cfg(test)]
mod tests {
    use crate::harness::{account, TestNode};
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_subtracts_never_overdraw() {
        let node = Arc::new(TestNode::start(vec![account("race", 1_000)]).await);

        let mut handles = Vec::new();
        for _ in 0..64 {
            let node = Arc::clone(&node);
            handles.push(tokio::spawn(async move {
                node.subtract("race", 30).await["status"] == 200
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                accepted += 1;
            }
        }

        // floor(1000 / 30) reservations fit.
        assert_eq!(accepted, 33);
        let status = node.status("race").await;
        assert_eq!(status["addition"]["hold"], 990);
        assert_eq!(status["addition"]["balance"], 1_000);
        assert_eq!(node.ledger.active_rows(), 0);

        let node = Arc::try_unwrap(node).ok().unwrap();
        node.stop().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_adds_are_not_lost() {
        let node = Arc::new(TestNode::start(vec![account("sum", 0)]).await);

        let mut handles = Vec::new();
        for value in 1..=50u64 {
            let node = Arc::clone(&node);
            handles.push(tokio::spawn(async move {
                assert_eq!(node.add("sum", value).await["status"], 200);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let status = node.status("sum").await;
        assert_eq!(status["addition"]["balance"], 1_275);

        let node = Arc::try_unwrap(node).ok().unwrap();
        node.stop().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_accounts_progress_together() {
        let accounts = (0..8).map(|i| account(&format!("acct-{i}"), 100)).collect();
        let node = Arc::new(TestNode::start(accounts).await);

        let mut handles = Vec::new();
        for i in 0..8 {
            for _ in 0..5 {
                let node = Arc::clone(&node);
                handles.push(tokio::spawn(async move {
                    node.subtract(&format!("acct-{i}"), 20).await["status"] == 200
                }));
            }
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        for i in 0..8 {
            let status = node.status(&format!("acct-{i}")).await;
            assert_eq!(status["addition"]["hold"], 100);
        }

        let node = Arc::try_unwrap(node).ok().unwrap();
        node.stop().await;
    }
}
