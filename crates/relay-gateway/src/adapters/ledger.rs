//! Ledger backend: builds, signs, and submits real transactions against
//! the deployed journal program, and lists entries from program-owned
//! accounts.

use crate::domain::config::LedgerConfig;
use crate::domain::error::GatewayError;
use crate::domain::types::{
    apply_listing, ConnectionInfo, EntryView, HealthResponse, ListQuery, SubmitJournalRequest,
    TransactionReceipt, VoteJournalRequest,
};
use crate::ports::outbound::{BackendError, JournalBackend, SystemTimeSource, TimeSource};
use async_trait::async_trait;
use relay_ledger::pda::MAX_SEED_LEN;
use relay_ledger::{
    find_entry_address, AccountMeta, Instruction, Message, RpcClient, Transaction, WalletKeypair,
};
use relay_types::{
    decode_entry_account, JournalEntry, JournalInstruction, Pubkey, SYSTEM_PROGRAM_ID,
};
use std::str::FromStr;
use std::sync::Arc;

/// The real execution strategy: every mutation becomes a signed
/// transaction, every read an account scan. No state is held here beyond
/// the connection and the signing identity.
pub struct LedgerBackend {
    rpc: RpcClient,
    wallet: WalletKeypair,
    program_id: Pubkey,
    network: String,
    clock: Arc<dyn TimeSource>,
}

impl LedgerBackend {
    /// Build the backend from validated configuration.
    pub fn new(config: &LedgerConfig) -> Result<Self, GatewayError> {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }

    /// Build the backend on an injected clock.
    pub fn with_clock(
        config: &LedgerConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, GatewayError> {
        let wallet = WalletKeypair::from_bytes_literal(&config.private_key)
            .map_err(|e| GatewayError::Backend(format!("wallet: {e}")))?;
        let program_id = Pubkey::from_str(&config.program_id)
            .map_err(|e| GatewayError::Backend(format!("program id: {e}")))?;
        let rpc = RpcClient::new(config.rpc_url.clone(), config.rpc_timeout)
            .map_err(|e| GatewayError::Backend(format!("rpc client: {e}")))?;
        tracing::info!(wallet = %wallet.pubkey(), "wallet loaded");

        Ok(Self {
            rpc,
            wallet,
            program_id,
            network: config.network.clone(),
            clock,
        })
    }

    /// Sign `instruction` with the relay wallet and submit it.
    async fn sign_and_send(&self, instruction: Instruction) -> Result<String, BackendError> {
        let payer = self.wallet.pubkey();
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let message = Message::compile(&payer, &[instruction], blockhash)?;
        let tx = Transaction::new_signed(message, &self.wallet);
        let signature = self.rpc.send_transaction(&tx.encode_base64()).await?;
        Ok(signature)
    }
}

#[async_trait]
impl JournalBackend for LedgerBackend {
    async fn submit_entry(
        &self,
        request: SubmitJournalRequest,
    ) -> Result<TransactionReceipt, BackendError> {
        if request.content_hash.len() > MAX_SEED_LEN {
            return Err(BackendError::Invalid(format!(
                "content_hash exceeds {MAX_SEED_LEN} bytes"
            )));
        }

        let payer = self.wallet.pubkey();
        let entry = JournalEntry {
            content_hash: request.content_hash.clone(),
            is_public: u8::from(request.is_public),
            timestamp: self.clock.now(),
            owner: payer.to_string(),
            upvotes: 0,
            downvotes: 0,
        };
        let data = borsh::to_vec(&JournalInstruction::SubmitEntry(entry))
            .map_err(|e| BackendError::Internal(format!("instruction encoding: {e}")))?;

        let (entry_address, _bump) =
            find_entry_address(&payer, &request.content_hash, &self.program_id)?;

        let instruction = Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(payer, true),
                AccountMeta::new(entry_address, false),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID, false),
            ],
            data,
        };

        let signature = self.sign_and_send(instruction).await?;
        tracing::info!(
            entry = %entry_address,
            signature = %signature,
            "journal entry submitted"
        );

        Ok(TransactionReceipt::success(
            signature,
            "Journal entry submitted successfully",
        ))
    }

    async fn list_entries(&self, query: ListQuery) -> Result<Vec<EntryView>, BackendError> {
        let accounts = self.rpc.get_program_accounts(&self.program_id).await?;

        let total = accounts.len();
        let mut skipped = 0usize;
        let views: Vec<EntryView> = accounts
            .into_iter()
            .filter_map(|account| match decode_entry_account(&account.data) {
                Ok(entry) => Some(EntryView {
                    content_hash: entry.content_hash,
                    is_public: entry.is_public != 0,
                    timestamp: entry.timestamp,
                    owner: entry.owner,
                    address: account.address,
                    upvotes: Some(entry.upvotes),
                    downvotes: Some(entry.downvotes),
                }),
                Err(e) => {
                    skipped += 1;
                    tracing::debug!(address = %account.address, error = %e, "skipping undecodable account");
                    None
                }
            })
            .collect();
        if skipped > 0 {
            tracing::warn!(skipped, total, "dropped undecodable entry accounts");
        }

        Ok(apply_listing(views, &query))
    }

    async fn vote_entry(
        &self,
        request: VoteJournalRequest,
    ) -> Result<TransactionReceipt, BackendError> {
        let entry_address = Pubkey::from_str(&request.entry_id)
            .map_err(|e| BackendError::Invalid(format!("Invalid entry_id: {e}")))?;

        let data = borsh::to_vec(&JournalInstruction::Vote {
            is_upvote: u8::from(request.is_upvote),
        })
        .map_err(|e| BackendError::Internal(format!("instruction encoding: {e}")))?;

        let instruction = Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(self.wallet.pubkey(), true),
                AccountMeta::new(entry_address, false),
            ],
            data,
        };

        let signature = self.sign_and_send(instruction).await?;
        tracing::info!(entry = %entry_address, signature = %signature, "vote submitted");

        Ok(TransactionReceipt::success(
            signature,
            "Vote submitted successfully",
        ))
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        let version = self
            .rpc
            .get_version()
            .await
            .map_err(|e| BackendError::Unavailable(format!("Service unhealthy: {e}")))?;
        let balance = self
            .rpc
            .get_balance(&self.wallet.pubkey())
            .await
            .map_err(|e| BackendError::Unavailable(format!("Service unhealthy: {e}")))?;

        Ok(HealthResponse::Ledger {
            status: "healthy".to_string(),
            connection: ConnectionInfo {
                status: "ok".to_string(),
                version,
            },
            network: self.network.clone(),
            program_id: self.program_id.to_string(),
            wallet_public_key: self.wallet.pubkey().to_string(),
            wallet_balance: balance.to_string(),
        })
    }
}
