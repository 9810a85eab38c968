//! # Wallet Keypair
//!
//! Loads the relay's signing identity from the configured array-of-bytes
//! literal and signs transaction messages with it.

use crate::error::LedgerError;
use ed25519_dalek::{Signer, SigningKey};
use relay_types::{Pubkey, Signature};

/// The relay's ed25519 signing wallet.
///
/// The key never leaves this type; callers get the public identity and
/// signatures only.
pub struct WalletKeypair {
    signing: SigningKey,
}

impl WalletKeypair {
    /// Parse a key from an array-of-bytes literal such as `[12, 34, ...]`.
    ///
    /// Accepts the 64-byte secret-plus-public form exported by ledger
    /// tooling, or a bare 32-byte secret.
    pub fn from_bytes_literal(literal: &str) -> Result<Self, LedgerError> {
        let trimmed = literal.trim().trim_start_matches('[').trim_end_matches(']');
        let bytes = trimmed
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|e| LedgerError::Key(format!("not an array of bytes: {e}")))?;

        Self::from_bytes(&bytes)
    }

    /// Build a keypair from raw bytes (64-byte keypair or 32-byte secret).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        let signing = match bytes.len() {
            64 => {
                let mut arr = [0u8; 64];
                arr.copy_from_slice(bytes);
                SigningKey::from_keypair_bytes(&arr)
                    .map_err(|e| LedgerError::Key(format!("invalid keypair bytes: {e}")))?
            }
            32 => {
                let mut arr = [0u8; 32];
                arr.copy_from_slice(bytes);
                SigningKey::from_bytes(&arr)
            }
            n => {
                return Err(LedgerError::Key(format!(
                    "expected 32 or 64 key bytes, got {n}"
                )))
            }
        };
        Ok(Self { signing })
    }

    /// Public identity of this wallet.
    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new(self.signing.verifying_key().to_bytes())
    }

    /// Sign a serialized transaction message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing.sign(message).to_bytes())
    }
}
