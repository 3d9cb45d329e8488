//! # HTTP API Flows
//!
//! Envelope shape, success paths and every failure reason of the four API
//! routes, plus the ambient `/health` and `/metrics` routes.

#[cfg(test)]
mod tests {
    use crate::harness::{account, account_with, TestNode};
    use hb_02_api_gateway::GatewayConfig;
    use serde_json::json;

    fn fixtures() -> Vec<shared_types::NewAccount> {
        vec![
            account("alice", 100),
            account_with("frozen", 50, 0, false),
            account_with("busy", 10, 10, true),
        ]
    }

    #[tokio::test]
    async fn test_ping_returns_empty_success() {
        let node = TestNode::start(vec![]).await;

        let response = node.post_raw("/api/ping", "").await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({"status": 200, "result": true, "addition": {}, "description": {}})
        );

        node.stop().await;
    }

    #[tokio::test]
    async fn test_status_reports_balance_hold_and_flag() {
        let node = TestNode::start(fixtures()).await;

        let body = node.status("busy").await;
        assert_eq!(body["status"], 200);
        assert_eq!(body["result"], true);
        assert_eq!(body["addition"], json!({"balance": 10, "hold": 10, "status": true}));
        assert_eq!(body["description"], json!({}));

        let body = node.status("frozen").await;
        assert_eq!(body["addition"]["status"], false);

        node.stop().await;
    }

    #[tokio::test]
    async fn test_add_and_subtract_flow() {
        let node = TestNode::start(fixtures()).await;

        assert_eq!(node.add("alice", 20).await["status"], 200);
        assert_eq!(node.subtract("alice", 70).await["status"], 200);

        let body = node.status("alice").await;
        assert_eq!(body["addition"], json!({"balance": 120, "hold": 70, "status": true}));

        let body = node.subtract("alice", 51).await;
        assert_eq!(body["status"], 403);
        assert_eq!(body["result"], false);
        assert_eq!(body["addition"], json!({"reason": "balance too low"}));

        assert_eq!(node.subtract("alice", 50).await["status"], 200);

        node.stop().await;
    }

    #[tokio::test]
    async fn test_failure_reasons() {
        let node = TestNode::start(fixtures()).await;

        let body = node.status("nobody").await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["addition"]["reason"], "uuid not found");

        for body in [node.add("frozen", 1).await, node.subtract("frozen", 1).await] {
            assert_eq!(body["status"], 403);
            assert_eq!(body["addition"]["reason"], "status is inactive");
        }

        let body = node.subtract("busy", 1).await;
        assert_eq!(body["addition"]["reason"], "balance too low");

        let body = node.add("alice", u64::MAX).await;
        assert_eq!(body["status"], 403);
        assert_eq!(body["addition"]["reason"], "balance overflow");

        node.stop().await;
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let node = TestNode::start(fixtures()).await;

        let bodies = [
            "garbage".to_string(),
            json!({}).to_string(),
            json!({"addition": {}}).to_string(),
            json!({"addition": {"uuid": "alice"}}).to_string(),
            json!({"addition": {"uuid": "alice", "value": -1}}).to_string(),
            json!({"addition": {"uuid": "alice", "value": 1.5}}).to_string(),
            json!({"addition": {"uuid": "alice", "value": true}}).to_string(),
            json!({"addition": {"uuid": ["alice"], "value": 1}}).to_string(),
        ];

        for body in bodies {
            let envelope: serde_json::Value =
                node.post_raw("/api/add", body.clone()).await.json().await.unwrap();
            assert_eq!(envelope["status"], 400, "body: {body}");
            assert_eq!(envelope["addition"]["reason"], "bad request");
        }

        let status = node.status("alice").await;
        assert_eq!(status["addition"]["balance"], 100);

        node.stop().await;
    }

    #[tokio::test]
    async fn test_http_status_stays_ok_unless_mirrored() {
        let node = TestNode::start(fixtures()).await;
        let response = node.post_raw("/api/status", r#"{"addition": {"uuid": "x"}}"#).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        node.stop().await;

        let mut config = GatewayConfig::default();
        config.responses.mirror_http_status = true;
        let node = TestNode::start_with(config, fixtures()).await;

        let response = node.post_raw("/api/status", r#"{"addition": {"uuid": "x"}}"#).await;
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        let response = node.post_raw("/api/add", "nope").await;
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        node.stop().await;
    }

    #[tokio::test]
    async fn test_health_and_metrics() {
        let node = TestNode::start(fixtures()).await;
        node.add("alice", 1).await;
        node.status("nobody").await;

        let health = node.get("/health").await;
        assert_eq!(health["status"], "ok");
        assert_eq!(health["name"], "World");
        assert_eq!(health["accounts"], 3);
        assert!(health["version"].is_string());

        let metrics = node.get("/metrics").await;
        assert_eq!(metrics["requests"]["total"], 2);
        assert_eq!(metrics["operations"]["add"], 1);
        assert_eq!(metrics["failures"]["not_found"], 1);

        node.stop().await;
    }

    #[tokio::test]
    async fn test_unknown_route_and_wrong_method() {
        let node = TestNode::start(vec![]).await;

        let response = node.client.get(node.url("/api/ping")).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);

        let response = node.post_raw("/api/transfer", "{}").await;
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        node.stop().await;
    }
}
