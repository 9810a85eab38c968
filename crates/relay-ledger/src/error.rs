//! Ledger-side error types.

use relay_types::ParsePubkeyError;
use thiserror::Error;

/// Errors raised by wallet loading, address derivation, transaction
/// assembly, or the remote RPC connection.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The HTTP transport failed (connect, timeout, malformed body).
    #[error("RPC transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error; the remote message is
    /// carried verbatim.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code from the node.
        code: i64,
        /// Remote error message, unaltered.
        message: String,
    },

    /// The node answered without a result or error field.
    #[error("RPC response missing result")]
    MissingResult,

    /// The configured signing key material could not be parsed.
    #[error("Invalid signing key: {0}")]
    Key(String),

    /// Address derivation failed.
    #[error("Address derivation failed: {0}")]
    Derivation(String),

    /// A base58 address string failed to parse.
    #[error(transparent)]
    Pubkey(#[from] ParsePubkeyError),

    /// Payload encoding failed.
    #[error("Encoding error: {0}")]
    Encoding(String),
}
