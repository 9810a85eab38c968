//! In-memory backend: an ordered append-only sequence of entries with no
//! ledger interaction. Entries live for the process lifetime only.

use crate::domain::types::{
    EntryView, HealthResponse, ListQuery, SubmitJournalRequest, TransactionReceipt,
    VoteJournalRequest,
};
use crate::ports::outbound::{BackendError, JournalBackend, SystemTimeSource, TimeSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// One stored entry. No vote counters; voting is only acknowledged here.
#[derive(Debug, Clone)]
struct StoredEntry {
    content_hash: String,
    is_public: bool,
    timestamp: u64,
    owner: String,
    address: String,
}

/// The simulated execution strategy.
///
/// Writes are serialized under one mutex: the id assigned to a new entry
/// derives from the current store length, so concurrent submissions must
/// not interleave.
pub struct MemoryBackend {
    entries: Mutex<Vec<StoredEntry>>,
    clock: Arc<dyn TimeSource>,
}

impl MemoryBackend {
    /// Empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemTimeSource))
    }

    /// Empty store on an injected clock.
    pub fn with_clock(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            clock,
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JournalBackend for MemoryBackend {
    async fn submit_entry(
        &self,
        request: SubmitJournalRequest,
    ) -> Result<TransactionReceipt, BackendError> {
        let owner = request
            .wallet_address
            .filter(|w| !w.is_empty())
            .ok_or_else(|| BackendError::Invalid("wallet_address is required".to_string()))?;

        let timestamp = self.clock.now();
        let mut entries = self.entries.lock();
        let address = format!("local-{}", entries.len());
        entries.push(StoredEntry {
            content_hash: request.content_hash,
            is_public: request.is_public,
            timestamp,
            owner,
            address: address.clone(),
        });

        tracing::info!(address = %address, "journal entry stored in memory");
        Ok(TransactionReceipt::success(
            address,
            "Journal entry stored successfully",
        ))
    }

    async fn list_entries(&self, query: ListQuery) -> Result<Vec<EntryView>, BackendError> {
        let views: Vec<EntryView> = self
            .entries
            .lock()
            .iter()
            .map(|e| EntryView {
                content_hash: e.content_hash.clone(),
                is_public: e.is_public,
                timestamp: e.timestamp,
                owner: e.owner.clone(),
                address: e.address.clone(),
                upvotes: None,
                downvotes: None,
            })
            .collect();

        // The simulated listing is always public-only and unfiltered by
        // owner; only the page window is honored.
        let forced = ListQuery {
            public_only: true,
            owner: None,
            skip: query.skip,
            limit: query.limit,
        };
        Ok(crate::domain::types::apply_listing(views, &forced))
    }

    async fn vote_entry(
        &self,
        request: VoteJournalRequest,
    ) -> Result<TransactionReceipt, BackendError> {
        let known = self
            .entries
            .lock()
            .iter()
            .any(|e| e.address == request.entry_id);
        if !known {
            return Err(BackendError::Invalid(format!(
                "Invalid entry_id: no entry at '{}'",
                request.entry_id
            )));
        }

        Ok(TransactionReceipt::success(
            request.entry_id,
            "Vote recorded",
        ))
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        Ok(HealthResponse::Memory {
            status: "healthy".to_string(),
            timestamp: self.clock.now(),
            entries_count: self.entries.lock().len(),
        })
    }
}
