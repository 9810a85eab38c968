//! End-to-end HTTP flows against the memory backend, plus the
//! unreachable-ledger health path. Each test spawns its own gateway on an
//! ephemeral port and talks to it with a real HTTP client.

#[cfg(test)]
mod tests {
    use relay_gateway::{BackendMode, GatewayConfig, GatewayService, HttpConfig, LedgerConfig};
    use relay_types::Pubkey;
    use serde_json::{json, Value};
    use std::time::Duration;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Spawn a gateway with the given config; returns its base URL.
    async fn spawn_gateway(config: GatewayConfig) -> String {
        let service = GatewayService::new(config).expect("service construction");
        let router = service.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}")
    }

    async fn spawn_memory_gateway() -> String {
        spawn_gateway(GatewayConfig {
            http: HttpConfig::default(),
            mode: BackendMode::Memory,
            ledger: None,
        })
        .await
    }

    /// A ledger-mode gateway pointing at a port nothing listens on.
    async fn spawn_unreachable_ledger_gateway() -> String {
        let key: Vec<String> = (0u8..32).map(|b| b.to_string()).collect();
        spawn_gateway(GatewayConfig {
            http: HttpConfig::default(),
            mode: BackendMode::Ledger,
            ledger: Some(LedgerConfig {
                rpc_url: "http://127.0.0.1:9".to_string(),
                private_key: format!("[{}]", key.join(",")),
                program_id: Pubkey::new([42u8; 32]).to_string(),
                network: "devnet".to_string(),
                rpc_timeout: Duration::from_secs(2),
            }),
        })
        .await
    }

    async fn submit(
        client: &reqwest::Client,
        base: &str,
        content_hash: &str,
        is_public: bool,
    ) -> reqwest::Response {
        client
            .post(format!("{base}/submit_journal"))
            .json(&json!({
                "content_hash": content_hash,
                "is_public": is_public,
                "wallet_address": "wallet-1",
            }))
            .send()
            .await
            .expect("submit request")
    }

    async fn list(client: &reqwest::Client, base: &str, query: &str) -> Vec<Value> {
        client
            .get(format!("{base}/journal_entries{query}"))
            .send()
            .await
            .expect("list request")
            .json()
            .await
            .expect("list body")
    }

    // =========================================================================
    // SUBMIT / LIST FLOWS
    // =========================================================================

    #[tokio::test]
    async fn test_submit_then_list_includes_entry() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        let response = submit(&client, &base, "abc123", true).await;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "success");
        assert!(!body["transaction_id"].as_str().unwrap().is_empty());

        let entries = list(&client, &base, "").await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["content_hash"], "abc123");
        assert_eq!(entries[0]["is_public"], true);
        assert!(entries[0]["timestamp"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_newer_submission_lists_first() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        submit(&client, &base, "A", true).await;
        submit(&client, &base, "B", true).await;

        let entries = list(&client, &base, "").await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["content_hash"], "B");
        assert_eq!(entries[1]["content_hash"], "A");
        assert!(
            entries[0]["timestamp"].as_u64().unwrap()
                >= entries[1]["timestamp"].as_u64().unwrap()
        );
    }

    #[tokio::test]
    async fn test_pagination_returns_most_recent_page() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        submit(&client, &base, "A", true).await;
        submit(&client, &base, "B", true).await;

        let page = list(&client, &base, "?skip=0&limit=1").await;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["content_hash"], "B");

        let rest = list(&client, &base, "?skip=1&limit=1").await;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0]["content_hash"], "A");
    }

    #[tokio::test]
    async fn test_out_of_range_skip_is_empty_not_error() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        submit(&client, &base, "A", true).await;

        let response = client
            .get(format!("{base}/journal_entries?skip=100"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let entries: Vec<Value> = response.json().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_default_page_size_is_twenty() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        for i in 0..25 {
            submit(&client, &base, &format!("entry-{i}"), true).await;
        }

        let entries = list(&client, &base, "").await;
        assert_eq!(entries.len(), 20);
    }

    #[tokio::test]
    async fn test_private_entries_hidden_and_counters_absent() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        submit(&client, &base, "pub", true).await;
        submit(&client, &base, "priv", false).await;

        let entries = list(&client, &base, "").await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["content_hash"], "pub");
        // Memory variant carries no vote counters.
        assert!(entries[0].get("upvotes").is_none());
        assert!(entries[0].get("downvotes").is_none());
    }

    #[tokio::test]
    async fn test_submit_without_wallet_address_is_400() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/submit_journal"))
            .json(&json!({ "content_hash": "abc", "is_public": true }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].as_str().unwrap().contains("wallet_address"));
    }

    // =========================================================================
    // VOTE FLOWS
    // =========================================================================

    #[tokio::test]
    async fn test_vote_on_known_entry_succeeds() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        submit(&client, &base, "abc123", true).await;

        let response = client
            .post(format!("{base}/vote_journal"))
            .json(&json!({ "entry_id": "local-0", "is_upvote": true }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "success");
    }

    #[tokio::test]
    async fn test_vote_on_unknown_entry_is_400() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/vote_journal"))
            .json(&json!({ "entry_id": "local-99", "is_upvote": false }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].as_str().unwrap().contains("entry_id"));
    }

    // =========================================================================
    // HEALTH
    // =========================================================================

    #[tokio::test]
    async fn test_memory_health_reports_count() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        submit(&client, &base, "a", true).await;
        submit(&client, &base, "b", false).await;

        let response = client.get(format!("{base}/health")).send().await.unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["entries_count"], 2);
        assert!(body["timestamp"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_unreachable_ledger_health_is_503_with_reason() {
        let base = spawn_unreachable_ledger_gateway().await;
        let client = reqwest::Client::new();

        let response = client.get(format!("{base}/health")).send().await.unwrap();
        assert_eq!(response.status(), 503);
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].as_str().unwrap().contains("unhealthy"));
    }

    #[tokio::test]
    async fn test_unreachable_ledger_submit_is_500() {
        let base = spawn_unreachable_ledger_gateway().await;
        let client = reqwest::Client::new();

        let response = submit(&client, &base, "abc123", true).await;
        assert_eq!(response.status(), 500);
        let body: Value = response.json().await.unwrap();
        assert!(!body["detail"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ledger_vote_rejects_malformed_id_before_submission() {
        // Even with the node unreachable, a malformed id must fail fast
        // with 400, proving no submission was attempted.
        let base = spawn_unreachable_ledger_gateway().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/vote_journal"))
            .json(&json!({ "entry_id": "not-base58-0OIl", "is_upvote": true }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    // =========================================================================
    // CORS
    // =========================================================================

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let base = spawn_memory_gateway().await;
        let client = reqwest::Client::new();

        let response = client
            .request(reqwest::Method::OPTIONS, format!("{base}/submit_journal"))
            .header("Origin", "https://example.com")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
