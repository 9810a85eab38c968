//! JSON-RPC client for the remote ledger node.
//!
//! Four remote operations back the relay: latest-blockhash, transaction
//! submission, program-account enumeration, and balance/version for health
//! reporting. All calls are single-shot with a bounded timeout; a node-side
//! rejection surfaces the remote message verbatim.

use crate::error::LedgerError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use relay_types::{Blockhash, Pubkey};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: Option<String>,
    #[allow(dead_code)]
    id: Option<u64>,
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Node responses that wrap their payload in a commitment context.
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct LatestBlockhashValue {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
struct KeyedAccount {
    pubkey: String,
    account: AccountInfo,
}

#[derive(Debug, Deserialize)]
struct AccountInfo {
    /// Payload plus encoding label, e.g. `["<bytes>", "base64"]`.
    data: (String, String),
}

#[derive(Debug, Deserialize)]
struct VersionInfo {
    #[serde(rename = "solana-core")]
    core: String,
}

/// One program-owned account: its address and raw stored bytes.
#[derive(Debug, Clone)]
pub struct ProgramAccount {
    /// Base58 address of the account.
    pub address: String,
    /// Raw account data as stored by the program.
    pub data: Vec<u8>,
}

/// RPC client for communicating with the ledger node.
pub struct RpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a client with a bounded per-request timeout.
    pub fn new(rpc_url: String, timeout: Duration) -> Result<Self, LedgerError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            rpc_url,
            request_id: AtomicU64::new(1),
        })
    }

    /// Endpoint this client targets.
    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    /// Make a JSON-RPC call.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, LedgerError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(method, id, "sending RPC request");

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        let rpc_response: JsonRpcResponse<R> = response.json().await?;
        unwrap_response(rpc_response)
    }

    /// Fetch the latest block reference scoping a transaction's validity
    /// window.
    pub async fn get_latest_blockhash(&self) -> Result<Blockhash, LedgerError> {
        let result: WithContext<LatestBlockhashValue> = self
            .call("getLatestBlockhash", json!([{ "commitment": "confirmed" }]))
            .await?;
        Blockhash::from_str(&result.value.blockhash)
            .map_err(|e| LedgerError::Encoding(format!("blockhash: {e}")))
    }

    /// Submit a signed, base64-encoded transaction; returns its signature
    /// string.
    pub async fn send_transaction(&self, tx_base64: &str) -> Result<String, LedgerError> {
        self.call(
            "sendTransaction",
            json!([tx_base64, { "encoding": "base64" }]),
        )
        .await
    }

    /// Enumerate every account owned by the program, returning raw bytes
    /// per account plus its address.
    pub async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<ProgramAccount>, LedgerError> {
        let accounts: Vec<KeyedAccount> = self
            .call(
                "getProgramAccounts",
                json!([
                    program_id.to_string(),
                    { "encoding": "base64", "commitment": "confirmed" }
                ]),
            )
            .await?;

        accounts.into_iter().map(decode_keyed_account).collect()
    }

    /// Fetch a wallet's balance in native units.
    pub async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, LedgerError> {
        let result: WithContext<u64> =
            self.call("getBalance", json!([pubkey.to_string()])).await?;
        Ok(result.value)
    }

    /// Fetch the node's version string.
    pub async fn get_version(&self) -> Result<String, LedgerError> {
        let version: VersionInfo = self.call("getVersion", json!([])).await?;
        Ok(version.core)
    }
}

/// Split a response envelope into its payload or a typed error.
fn unwrap_response<R>(response: JsonRpcResponse<R>) -> Result<R, LedgerError> {
    if let Some(error) = response.error {
        return Err(LedgerError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    response.result.ok_or(LedgerError::MissingResult)
}

/// Decode one keyed account's base64 payload.
fn decode_keyed_account(keyed: KeyedAccount) -> Result<ProgramAccount, LedgerError> {
    let (payload, encoding) = keyed.account.data;
    if encoding != "base64" {
        return Err(LedgerError::Encoding(format!(
            "unexpected account encoding: {encoding}"
        )));
    }
    let data = BASE64
        .decode(payload.as_bytes())
        .map_err(|e| LedgerError::Encoding(format!("account data: {e}")))?;
    Ok(ProgramAccount {
        address: keyed.pubkey,
        data,
    })
}
