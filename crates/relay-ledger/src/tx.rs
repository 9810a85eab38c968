//! # Transaction Assembly
//!
//! Compiles an instruction plus its account references into a signed,
//! wire-encoded transaction. Array lengths use the ledger's compact-u16
//! encoding; keys are fixed 32 bytes, signatures fixed 64 bytes. The
//! serialized transaction is base64-encoded for submission.

use crate::error::LedgerError;
use crate::keypair::WalletKeypair;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use relay_types::{Blockhash, Pubkey, Signature};

/// One account referenced by an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    /// The referenced account.
    pub pubkey: Pubkey,
    /// Whether the account must sign the transaction.
    pub is_signer: bool,
    /// Whether the program may mutate the account.
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account reference.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account reference.
    pub fn readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// A single program invocation: target program, account references, and the
/// encoded payload.
#[derive(Debug, Clone)]
pub struct Instruction {
    /// Program to invoke.
    pub program_id: Pubkey,
    /// Ordered account references.
    pub accounts: Vec<AccountMeta>,
    /// Encoded instruction payload.
    pub data: Vec<u8>,
}

/// Message header: counts that let the node split the key list into
/// signer/writability classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Keys that must sign, from the front of the key list.
    pub num_required_signatures: u8,
    /// Trailing signer keys that are read-only.
    pub num_readonly_signed_accounts: u8,
    /// Trailing non-signer keys that are read-only.
    pub num_readonly_unsigned_accounts: u8,
}

/// An instruction with its accounts resolved to key-list indices.
#[derive(Debug, Clone)]
pub struct CompiledInstruction {
    /// Index of the program id in the message key list.
    pub program_id_index: u8,
    /// Indices of the referenced accounts.
    pub accounts: Vec<u8>,
    /// Encoded instruction payload.
    pub data: Vec<u8>,
}

/// A compiled, unsigned transaction message.
#[derive(Debug, Clone)]
pub struct Message {
    /// Signer/writability layout of the key list.
    pub header: MessageHeader,
    /// Deduplicated account keys, fee payer first.
    pub account_keys: Vec<Pubkey>,
    /// Recent block reference scoping the validity window.
    pub recent_blockhash: Blockhash,
    /// Instructions with account references resolved to indices.
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Compile instructions into a message with `fee_payer` as the first
    /// required signer.
    ///
    /// Keys are deduplicated with merged privileges and ordered: writable
    /// signers, read-only signers, writable non-signers, read-only
    /// non-signers. Program ids join the key list as read-only non-signers.
    pub fn compile(
        fee_payer: &Pubkey,
        instructions: &[Instruction],
        recent_blockhash: Blockhash,
    ) -> Result<Self, LedgerError> {
        let mut metas: Vec<AccountMeta> = vec![AccountMeta::new(*fee_payer, true)];
        for ix in instructions {
            for meta in &ix.accounts {
                metas.push(meta.clone());
            }
            metas.push(AccountMeta::readonly(ix.program_id, false));
        }

        // Merge duplicates, keeping the strongest privileges.
        let mut unique: Vec<AccountMeta> = Vec::new();
        for meta in metas {
            match unique.iter_mut().find(|m| m.pubkey == meta.pubkey) {
                Some(existing) => {
                    existing.is_signer |= meta.is_signer;
                    existing.is_writable |= meta.is_writable;
                }
                None => unique.push(meta),
            }
        }

        // Group by privilege class; first-appearance order within each
        // class, fee payer leads the writable-signer class by construction.
        let mut ordered: Vec<AccountMeta> = Vec::with_capacity(unique.len());
        for (want_signer, want_writable) in
            [(true, true), (true, false), (false, true), (false, false)]
        {
            ordered.extend(
                unique
                    .iter()
                    .filter(|m| m.is_signer == want_signer && m.is_writable == want_writable)
                    .cloned(),
            );
        }

        let num_required_signatures = ordered.iter().filter(|m| m.is_signer).count();
        let num_readonly_signed = ordered
            .iter()
            .filter(|m| m.is_signer && !m.is_writable)
            .count();
        let num_readonly_unsigned = ordered
            .iter()
            .filter(|m| !m.is_signer && !m.is_writable)
            .count();
        if ordered.len() > u8::MAX as usize {
            return Err(LedgerError::Encoding(format!(
                "too many distinct account keys: {}",
                ordered.len()
            )));
        }

        let account_keys: Vec<Pubkey> = ordered.iter().map(|m| m.pubkey).collect();

        let index_of = |key: &Pubkey| -> u8 {
            // Every key was inserted above, the lookup cannot miss.
            account_keys.iter().position(|k| k == key).unwrap_or(0) as u8
        };

        let compiled = instructions
            .iter()
            .map(|ix| CompiledInstruction {
                program_id_index: index_of(&ix.program_id),
                accounts: ix.accounts.iter().map(|m| index_of(&m.pubkey)).collect(),
                data: ix.data.clone(),
            })
            .collect();

        Ok(Self {
            header: MessageHeader {
                num_required_signatures: num_required_signatures as u8,
                num_readonly_signed_accounts: num_readonly_signed as u8,
                num_readonly_unsigned_accounts: num_readonly_unsigned as u8,
            },
            account_keys,
            recent_blockhash,
            instructions: compiled,
        })
    }

    /// Serialize to the signable wire form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);

        encode_compact_u16(self.account_keys.len() as u16, &mut out);
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }

        out.extend_from_slice(self.recent_blockhash.as_bytes());

        encode_compact_u16(self.instructions.len() as u16, &mut out);
        for ix in &self.instructions {
            out.push(ix.program_id_index);
            encode_compact_u16(ix.accounts.len() as u16, &mut out);
            out.extend_from_slice(&ix.accounts);
            encode_compact_u16(ix.data.len() as u16, &mut out);
            out.extend_from_slice(&ix.data);
        }
        out
    }
}

/// A signed transaction ready for submission.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// One signature per required signer, in key-list order.
    pub signatures: Vec<Signature>,
    /// The signed message.
    pub message: Message,
}

impl Transaction {
    /// Sign `message` with the wallet as sole signer.
    pub fn new_signed(message: Message, wallet: &WalletKeypair) -> Self {
        let signature = wallet.sign(&message.serialize());
        Self {
            signatures: vec![signature],
            message,
        }
    }

    /// Serialize to wire bytes: compact-u16 signature count, signatures,
    /// then the message.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        encode_compact_u16(self.signatures.len() as u16, &mut out);
        for sig in &self.signatures {
            out.extend_from_slice(sig.as_bytes());
        }
        out.extend_from_slice(&self.message.serialize());
        out
    }

    /// Base64 wire encoding used by the node's submit endpoint.
    pub fn encode_base64(&self) -> String {
        BASE64.encode(self.serialize())
    }
}

/// The ledger's variable-length u16: seven bits per byte, little-endian
/// groups, high bit marks continuation.
pub fn encode_compact_u16(mut value: u16, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}
