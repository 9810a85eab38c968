//! # Program-Derived Addresses
//!
//! Deterministic derivation of program-owned entry addresses from a seed
//! tuple. The digest is SHA-256 over the seeds, a candidate bump byte, the
//! program id, and a fixed domain separator; the bump is walked downward
//! from 255 until the digest is not a valid curve point, which guarantees
//! no private key can control the resulting address.

use crate::error::LedgerError;
use ed25519_dalek::VerifyingKey;
use relay_types::Pubkey;
use sha2::{Digest, Sha256};

/// Namespace tag prefixed to every entry address seed tuple.
pub const ENTRY_NAMESPACE: &[u8] = b"journal";

/// Domain separator fixed by the ledger's derivation scheme.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Longest individual seed the derivation accepts.
pub const MAX_SEED_LEN: usize = 32;

/// True when the bytes decompress to a point on the ed25519 curve.
fn is_on_curve(bytes: &[u8; 32]) -> bool {
    VerifyingKey::from_bytes(bytes).is_ok()
}

/// Hash one derivation candidate for the given bump.
fn derive_candidate(seeds: &[&[u8]], bump: u8, program_id: &Pubkey) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);
    hasher.finalize().into()
}

/// Derive the program address for an explicit bump.
///
/// Errors if any seed exceeds [`MAX_SEED_LEN`] or the candidate lands on
/// the curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey, LedgerError> {
    for seed in seeds {
        if seed.len() > MAX_SEED_LEN {
            return Err(LedgerError::Derivation(format!(
                "seed exceeds {MAX_SEED_LEN} bytes: {}",
                seed.len()
            )));
        }
    }

    let candidate = derive_candidate(seeds, bump, program_id);
    if is_on_curve(&candidate) {
        return Err(LedgerError::Derivation(
            "candidate address lies on the curve".to_string(),
        ));
    }
    Ok(Pubkey::new(candidate))
}

/// Find the first off-curve program address, walking the bump from 255 down.
///
/// Pure and reproducible: identical inputs always return the identical
/// address and bump.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), LedgerError> {
    for seed in seeds {
        if seed.len() > MAX_SEED_LEN {
            return Err(LedgerError::Derivation(format!(
                "seed exceeds {MAX_SEED_LEN} bytes: {}",
                seed.len()
            )));
        }
    }

    for bump in (0u8..=255).rev() {
        let candidate = derive_candidate(seeds, bump, program_id);
        if !is_on_curve(&candidate) {
            return Ok((Pubkey::new(candidate), bump));
        }
    }

    // Every bump on-curve has probability ~2^-256 per tuple.
    Err(LedgerError::Derivation(
        "no viable bump for seed tuple".to_string(),
    ))
}

/// Derive the storage address for a journal entry.
///
/// Seed tuple: namespace tag, the author's raw key bytes, the UTF-8 bytes
/// of the content hash.
pub fn find_entry_address(
    author: &Pubkey,
    content_hash: &str,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), LedgerError> {
    find_program_address(
        &[ENTRY_NAMESPACE, author.as_ref(), content_hash.as_bytes()],
        program_id,
    )
}
