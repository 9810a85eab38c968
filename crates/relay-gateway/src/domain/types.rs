//! Request/response DTOs for the four endpoints, plus the pure listing
//! pipeline (filter, sort, paginate) shared by both backends.

use serde::{Deserialize, Serialize};

/// Body of `POST /submit_journal`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitJournalRequest {
    /// Opaque content identifier; not validated against actual content.
    pub content_hash: String,
    /// Whether the entry is visible in public listings.
    pub is_public: bool,
    /// Owner attribution for the memory backend; the ledger backend always
    /// signs with its own wallet and ignores this.
    #[serde(default)]
    pub wallet_address: Option<String>,
}

/// Body of `POST /vote_journal`.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteJournalRequest {
    /// Address of the entry to vote on.
    pub entry_id: String,
    /// True for an upvote, false for a downvote.
    pub is_upvote: bool,
}

/// Acknowledgement returned by submit and vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// "success" on the happy path.
    pub status: String,
    /// Transaction signature, or the local id in the memory variant.
    pub transaction_id: String,
    /// Human-readable outcome.
    pub message: String,
}

impl TransactionReceipt {
    /// Happy-path receipt.
    pub fn success(transaction_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            transaction_id: transaction_id.into(),
            message: message.into(),
        }
    }
}

/// One entry in a `GET /journal_entries` response.
///
/// Vote counters are present only in the ledger variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryView {
    /// Opaque content identifier.
    pub content_hash: String,
    /// Visibility flag.
    pub is_public: bool,
    /// Server-assigned Unix seconds.
    pub timestamp: u64,
    /// Base58 identity of the author.
    pub owner: String,
    /// Storage address of the entry.
    pub address: String,
    /// Upvote counter (ledger variant).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<u64>,
    /// Downvote counter (ledger variant).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downvotes: Option<u64>,
}

/// Query string of `GET /journal_entries`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Restrict to public entries. Defaults on; the memory backend forces
    /// it on regardless.
    #[serde(default = "default_public_only")]
    pub public_only: bool,
    /// Optional owner equality filter (ledger variant).
    #[serde(default)]
    pub owner: Option<String>,
    /// Entries to skip after sorting.
    #[serde(default)]
    pub skip: usize,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            public_only: true,
            owner: None,
            skip: 0,
            limit: default_limit(),
        }
    }
}

fn default_public_only() -> bool {
    true
}

fn default_limit() -> usize {
    20
}

/// Body of `GET /health`.
///
/// The two variants report different diagnostics; the wire shape is decided
/// by whichever backend answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HealthResponse {
    /// Ledger variant: wallet and node diagnostics.
    Ledger {
        /// "healthy" when the whole chain checks out.
        status: String,
        /// Node reachability probe.
        connection: ConnectionInfo,
        /// Configured network label.
        network: String,
        /// Deployed program address.
        program_id: String,
        /// Relay wallet identity.
        wallet_public_key: String,
        /// Wallet balance in native units.
        wallet_balance: String,
    },
    /// Memory variant: process status and store size.
    Memory {
        /// Always "healthy" while the process serves.
        status: String,
        /// Current Unix seconds.
        timestamp: u64,
        /// Number of stored entries.
        entries_count: usize,
    },
}

/// Node reachability diagnostics inside the ledger health body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// "ok" when the version probe succeeded.
    pub status: String,
    /// Node version string.
    pub version: String,
}

/// Apply visibility/owner filters, sort by timestamp descending, and slice
/// the page `[skip, skip + limit)`.
///
/// Pure: identical input and query always produce identical ordered output.
/// An out-of-range skip yields an empty page, never an error.
pub fn apply_listing(entries: Vec<EntryView>, query: &ListQuery) -> Vec<EntryView> {
    let mut filtered: Vec<(usize, EntryView)> = entries
        .into_iter()
        .enumerate()
        .filter(|(_, e)| !query.public_only || e.is_public)
        .filter(|(_, e)| query.owner.as_ref().is_none_or(|owner| &e.owner == owner))
        .collect();

    // Newest first; ties resolve to the later-arriving entry.
    filtered.sort_by(|(ai, a), (bi, b)| b.timestamp.cmp(&a.timestamp).then(bi.cmp(ai)));

    filtered
        .into_iter()
        .map(|(_, e)| e)
        .skip(query.skip)
        .take(query.limit)
        .collect()
}
