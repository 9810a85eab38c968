//! # Relay Types Crate
//!
//! This crate contains the journal domain entities, the binary wire codec
//! used for instruction payloads and stored account data, and the base58
//! key primitives shared by the ledger client and the HTTP gateway.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every cross-crate type is defined here.
//! - **Fixed Wire Layout**: the account and instruction encodings are frozen
//!   by the deployed program; strings are u32-LE length prefixed, booleans
//!   are a single byte, counters are u64-LE.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod entities;
pub mod errors;
pub mod pubkey;

pub use entities::{decode_entry_account, JournalEntry, JournalInstruction};
pub use errors::{EntryDecodeError, ParsePubkeyError};
pub use pubkey::{Blockhash, Pubkey, Signature, SYSTEM_PROGRAM_ID};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
