//! Minimal Solana JSON-RPC client: blockhash, account existence, send.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use tracing::debug;

use crate::blockchain::client::ClientConfig;
use crate::core::errors::WalletError;
use crate::security::redaction::redact_body;

/// Public mainnet endpoint every Solana transfer goes through.
pub const SOLANA_MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Vec<Value>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
}

pub struct SolanaRpcClient {
    rpc_url: String,
    http_client: HttpClient,
}

impl SolanaRpcClient {
    pub fn new(config: &ClientConfig) -> Result<Self, WalletError> {
        let url = config.endpoint_url()?;
        Ok(Self { rpc_url: url.to_string(), http_client: config.http_client()? })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn post(&self, method: &str, params: Vec<Value>) -> Result<Value, WalletError> {
        let request = RpcRequest { jsonrpc: "2.0", id: 1, method, params };
        if tracing::enabled!(tracing::Level::DEBUG) {
            let body = serde_json::to_string(&request).unwrap_or_default();
            debug!(method, url = %self.rpc_url, body = %redact_body(&body), "solana rpc call");
        }

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::NetworkError(format!("RPC request {} failed: {}", method, e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| WalletError::NetworkError(format!("failed to parse {} response: {}", method, e)))
    }

    async fn rpc_call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, WalletError> {
        let raw = self.post(method, params).await?;
        let rpc_response: RpcResponse<T> = serde_json::from_value(raw).map_err(|e| {
            WalletError::BlockchainError(format!("unexpected {} response shape: {}", method, e))
        })?;

        if let Some(error) = rpc_response.error {
            return Err(WalletError::BlockchainError(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }
        rpc_response
            .result
            .ok_or_else(|| WalletError::BlockchainError(format!("{} response has no result", method)))
    }

    pub async fn get_latest_blockhash(&self) -> Result<Hash, WalletError> {
        let res: WithContext<LatestBlockhash> = self
            .rpc_call("getLatestBlockhash", vec![json!({ "commitment": "finalized" })])
            .await?;
        res.value
            .blockhash
            .parse()
            .map_err(|e| WalletError::BlockchainError(format!("invalid blockhash from node: {}", e)))
    }

    /// Whether an account exists; `value: null` means it does not.
    pub async fn account_exists(&self, account: &Pubkey) -> Result<bool, WalletError> {
        let res: WithContext<Option<Value>> = self
            .rpc_call("getAccountInfo", vec![json!(account.to_string()), json!({ "encoding": "base64" })])
            .await?;
        Ok(res.value.is_some())
    }

    /// Submit base64-encoded. The raw JSON-RPC response is returned untouched so the
    /// caller decides what counts as accepted.
    pub async fn send_transaction(&self, tx: &Transaction) -> Result<Value, WalletError> {
        let wire = bincode::serialize(tx)
            .map_err(|e| WalletError::SerializationError(format!("cannot encode transaction: {}", e)))?;
        let encoded = BASE64.encode(wire);
        self.post("sendTransaction", vec![json!(encoded), json!({ "encoding": "base64" })]).await
    }
}

/// A `sendTransaction` response counts as accepted only when `result` is a
/// signature string and `error` is absent or null.
pub fn accepted_signature(response: &Value) -> Option<&str> {
    if response.get("error").map_or(false, |e| !e.is_null()) {
        return None;
    }
    response.get("result").and_then(Value::as_str).filter(|s| !s.is_empty())
}
