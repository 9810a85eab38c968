//! # Journal Domain Entities
//!
//! The persisted entry record and the two instruction payloads understood by
//! the deployed journal program.
//!
//! ## Wire Layout
//!
//! The layout is frozen by the on-chain program: strings are u32-LE length
//! prefixed UTF-8, booleans are a single 0/1 byte, timestamps and counters
//! are u64-LE. Instruction payloads carry a leading discriminant byte
//! (0 = SubmitEntry, 1 = Vote); stored account data carries the bare
//! `JournalEntry` with no discriminant.

use crate::errors::EntryDecodeError;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A journal entry as persisted in a program-owned account.
///
/// `timestamp` is assigned by the relay at submission time and is immutable
/// thereafter. `upvotes`/`downvotes` start at zero and are mutated only by
/// the program's vote handler, never by the relay.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Opaque content identifier supplied by the caller.
    pub content_hash: String,
    /// Visibility flag, 0/1 on the wire.
    pub is_public: u8,
    /// Unix seconds, server-assigned at submission.
    pub timestamp: u64,
    /// Base58 identity of the submitting wallet.
    pub owner: String,
    /// Upvote counter.
    pub upvotes: u64,
    /// Downvote counter.
    pub downvotes: u64,
}

/// An instruction payload submitted to the journal program.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum JournalInstruction {
    /// Discriminant 0: create an entry account with the given record.
    SubmitEntry(JournalEntry),
    /// Discriminant 1: apply one vote to the target entry account.
    Vote {
        /// 1 for an upvote, 0 for a downvote.
        is_upvote: u8,
    },
}

/// Decode a stored entry account blob.
///
/// Accounts are allocated at a fixed size, so the record may be followed by
/// zero padding; trailing bytes are tolerated. Truncated or otherwise
/// malformed blobs produce an error the caller is expected to skip-and-count
/// rather than propagate.
pub fn decode_entry_account(data: &[u8]) -> Result<JournalEntry, EntryDecodeError> {
    let mut slice = data;
    <JournalEntry as BorshDeserialize>::deserialize(&mut slice)
        .map_err(|e| EntryDecodeError::Malformed(e.to_string()))
}
