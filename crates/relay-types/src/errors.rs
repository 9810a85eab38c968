//! # Error Types
//!
//! Typed errors for key parsing and account decoding.

use thiserror::Error;

/// Errors raised while parsing a base58 public key string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePubkeyError {
    /// The string is not valid base58.
    #[error("Invalid base58: {0}")]
    InvalidBase58(String),

    /// The decoded bytes are not exactly 32 bytes long.
    #[error("Invalid key length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Errors raised while decoding a stored journal entry account.
#[derive(Debug, Clone, Error)]
pub enum EntryDecodeError {
    /// The account bytes do not form a well-formed entry record.
    #[error("Malformed entry account: {0}")]
    Malformed(String),
}
