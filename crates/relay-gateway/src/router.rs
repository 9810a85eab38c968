//! Route table and request handlers.
//!
//! Each handler validates input, invokes the active backend through the
//! outbound port, logs failures with context, and converts them to an HTTP
//! response exactly once.

use crate::domain::error::ApiError;
use crate::domain::types::{
    EntryView, HealthResponse, ListQuery, SubmitJournalRequest, TransactionReceipt,
    VoteJournalRequest,
};
use crate::middleware::create_cors_layer;
use crate::ports::outbound::JournalBackend;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::error;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The active execution strategy.
    pub backend: Arc<dyn JournalBackend>,
}

/// Build the full router: four routes plus the permissive CORS layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/submit_journal", post(submit_journal))
        .route("/journal_entries", get(journal_entries))
        .route("/vote_journal", post(vote_journal))
        .route("/health", get(health))
        .layer(create_cors_layer())
        .with_state(state)
}

/// `POST /submit_journal`
async fn submit_journal(
    State(state): State<AppState>,
    Json(request): Json<SubmitJournalRequest>,
) -> Result<Json<TransactionReceipt>, ApiError> {
    state.backend.submit_entry(request).await.map(Json).map_err(|e| {
        error!(error = %e, "failed to submit journal entry");
        e.into()
    })
}

/// `GET /journal_entries`
async fn journal_entries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EntryView>>, ApiError> {
    state.backend.list_entries(query).await.map(Json).map_err(|e| {
        error!(error = %e, "failed to fetch journal entries");
        e.into()
    })
}

/// `POST /vote_journal`
async fn vote_journal(
    State(state): State<AppState>,
    Json(request): Json<VoteJournalRequest>,
) -> Result<Json<TransactionReceipt>, ApiError> {
    state.backend.vote_entry(request).await.map(Json).map_err(|e| {
        error!(error = %e, "failed to vote on journal entry");
        e.into()
    })
}

/// `GET /health`
async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state.backend.health().await.map(Json).map_err(|e| {
        error!(error = %e, "health check failed");
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryBackend;
    use crate::ports::outbound::BackendError;
    use async_trait::async_trait;
    use axum::http::StatusCode;

    fn memory_state() -> AppState {
        AppState {
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    fn submit_request(content: &str) -> SubmitJournalRequest {
        SubmitJournalRequest {
            content_hash: content.to_string(),
            is_public: true,
            wallet_address: Some("wallet-1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_then_list_round_trip() {
        let state = memory_state();

        let Json(receipt) = submit_journal(State(state.clone()), Json(submit_request("abc123")))
            .await
            .unwrap();
        assert_eq!(receipt.status, "success");
        assert!(!receipt.transaction_id.is_empty());

        let Json(entries) = journal_entries(State(state), Query(ListQuery::default()))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content_hash, "abc123");
        assert!(entries[0].is_public);
        assert!(entries[0].timestamp > 0);
    }

    #[tokio::test]
    async fn test_vote_on_unknown_entry_is_400() {
        let state = memory_state();
        let err = vote_journal(
            State(state),
            Json(VoteJournalRequest {
                entry_id: "local-7".to_string(),
                is_upvote: true,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_counts_entries() {
        let state = memory_state();
        submit_journal(State(state.clone()), Json(submit_request("a")))
            .await
            .unwrap();

        let Json(body) = health(State(state)).await.unwrap();
        match body {
            HealthResponse::Memory { entries_count, .. } => assert_eq!(entries_count, 1),
            other => panic!("unexpected health shape: {other:?}"),
        }
    }

    /// A backend whose health probe always fails, standing in for an
    /// unreachable ledger node.
    struct DownBackend;

    #[async_trait]
    impl JournalBackend for DownBackend {
        async fn submit_entry(
            &self,
            _request: SubmitJournalRequest,
        ) -> Result<TransactionReceipt, BackendError> {
            Err(BackendError::Internal("node unreachable".to_string()))
        }

        async fn list_entries(&self, _query: ListQuery) -> Result<Vec<EntryView>, BackendError> {
            Err(BackendError::Internal("node unreachable".to_string()))
        }

        async fn vote_entry(
            &self,
            _request: VoteJournalRequest,
        ) -> Result<TransactionReceipt, BackendError> {
            Err(BackendError::Internal("node unreachable".to_string()))
        }

        async fn health(&self) -> Result<HealthResponse, BackendError> {
            Err(BackendError::Unavailable(
                "Service unhealthy: connection refused".to_string(),
            ))
        }
    }

    #[tokio::test]
    async fn test_unreachable_node_maps_health_to_503() {
        let state = AppState {
            backend: Arc::new(DownBackend),
        };
        let err = health(State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.detail.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_backend_failure_maps_submit_to_500() {
        let state = AppState {
            backend: Arc::new(DownBackend),
        };
        let err = submit_journal(State(state), Json(submit_request("a")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
