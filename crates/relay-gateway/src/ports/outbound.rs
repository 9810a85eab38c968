//! Outbound ports for the relay gateway.
//!
//! `JournalBackend` is the seam between the HTTP surface and whichever
//! execution strategy is active; handlers never know which one they talk
//! to.

use crate::domain::error::ApiError;
use crate::domain::types::{
    EntryView, HealthResponse, ListQuery, SubmitJournalRequest, TransactionReceipt,
    VoteJournalRequest,
};
use async_trait::async_trait;
use relay_ledger::LedgerError;
use thiserror::Error;

/// Failures a backend can produce, mapped to HTTP exactly once at the API
/// boundary.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Caller-supplied input is malformed (400).
    #[error("{0}")]
    Invalid(String),

    /// A dependency is unreachable (503).
    #[error("{0}")]
    Unavailable(String),

    /// Signing, derivation, encoding, or submission failed (500).
    #[error("{0}")]
    Internal(String),
}

impl From<LedgerError> for BackendError {
    fn from(e: LedgerError) -> Self {
        BackendError::Internal(e.to_string())
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Invalid(detail) => ApiError::bad_request(detail),
            BackendError::Unavailable(detail) => ApiError::unavailable(detail),
            BackendError::Internal(detail) => ApiError::internal(detail),
        }
    }
}

/// The execution strategy behind the four endpoints.
#[async_trait]
pub trait JournalBackend: Send + Sync {
    /// Create a new entry; the timestamp is assigned here, never by the
    /// caller.
    async fn submit_entry(
        &self,
        request: SubmitJournalRequest,
    ) -> Result<TransactionReceipt, BackendError>;

    /// Fetch, filter, sort, and paginate entries.
    async fn list_entries(&self, query: ListQuery) -> Result<Vec<EntryView>, BackendError>;

    /// Vote on an existing entry.
    async fn vote_entry(
        &self,
        request: VoteJournalRequest,
    ) -> Result<TransactionReceipt, BackendError>;

    /// Diagnostics for `GET /health`.
    async fn health(&self) -> Result<HealthResponse, BackendError>;
}

/// Time source trait for testability.
pub trait TimeSource: Send + Sync {
    /// Current Unix seconds.
    fn now(&self) -> u64;
}

/// System clock implementation.
#[derive(Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
