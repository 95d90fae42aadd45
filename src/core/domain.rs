use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::security::redaction::REDACTED;

/// One transfer as collected by a front end.
///
/// The private key is only reachable through [`TransferRequest::with_private_key`];
/// `Debug` never prints it.
pub struct TransferRequest {
    private_key: SecretString,
    pub to_address: String,
    pub chain_name: String,
    pub coin_name: String,
    /// Human decimal string, e.g. "0.0001"
    pub amount: String,
}

impl TransferRequest {
    pub fn new(
        private_key: impl Into<String>,
        to_address: impl Into<String>,
        chain_name: impl Into<String>,
        coin_name: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            private_key: SecretString::new(private_key.into()),
            to_address: to_address.into().trim().to_string(),
            chain_name: chain_name.into(),
            coin_name: coin_name.into(),
            amount: amount.into().trim().to_string(),
        }
    }

    /// Run `f` with access to the raw key. Keep the borrow short.
    pub fn with_private_key<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        f(self.private_key.expose_secret().trim())
    }
}

impl fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferRequest")
            .field("private_key", &REDACTED)
            .field("to_address", &self.to_address)
            .field("chain_name", &self.chain_name)
            .field("coin_name", &self.coin_name)
            .field("amount", &self.amount)
            .finish()
    }
}

/// Outcome of a transfer, always JSON-serializable.
///
/// Built only through [`TransferResult::succeeded`], [`TransferResult::failed`] and
/// [`TransferResult::reverted`]:
/// success implies a hash and no error, failure implies an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    success: bool,
    tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Fields shared by every successful path.
#[derive(Debug, Clone, Default)]
pub struct TransferDetails {
    pub from_address: String,
    pub to_address: String,
    pub amount: String,
    pub chain_name: String,
    pub coin_name: String,
}

impl TransferResult {
    pub fn succeeded(tx_hash: impl Into<String>, details: TransferDetails, block_number: Option<u64>) -> Self {
        Self {
            success: true,
            tx_hash: Some(tx_hash.into()),
            from_address: Some(details.from_address),
            to_address: Some(details.to_address),
            amount: Some(details.amount),
            chain_name: Some(details.chain_name),
            coin_name: Some(details.coin_name),
            block_number,
            error: None,
        }
    }

    /// Failure before anything was mined.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            tx_hash: None,
            from_address: None,
            to_address: None,
            amount: None,
            chain_name: None,
            coin_name: None,
            block_number: None,
            error: Some(error.into()),
        }
    }

    /// Mined with a non-success status: the hash is kept so the caller can look it up.
    pub fn reverted(tx_hash: impl Into<String>, error: impl Into<String>) -> Self {
        Self { tx_hash: Some(tx_hash.into()), ..Self::failed(error) }
    }

    /// Prefix the error with the chain, the form every dispatcher failure takes.
    pub(crate) fn with_chain_prefix(mut self, chain_name: &str) -> Self {
        if let Some(err) = self.error.take() {
            self.error = Some(format!("{} transfer failed: {}", chain_name, err));
        }
        self
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn tx_hash(&self) -> Option<&str> {
        self.tx_hash.as_deref()
    }

    pub fn from_address(&self) -> Option<&str> {
        self.from_address.as_deref()
    }

    pub fn to_address(&self) -> Option<&str> {
        self.to_address.as_deref()
    }

    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref()
    }

    pub fn chain_name(&self) -> Option<&str> {
        self.chain_name.as_deref()
    }

    pub fn coin_name(&self) -> Option<&str> {
        self.coin_name.as_deref()
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn to_json_pretty(&self) -> String {
        // a struct of strings and integers cannot fail to serialize
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Lifecycle of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferState {
    Idle,
    Validating,
    Submitting,
    Confirming,
    Succeeded,
    Failed,
}

impl TransferState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Succeeded | TransferState::Failed)
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransferState::Idle => "idle",
            TransferState::Validating => "validating",
            TransferState::Submitting => "submitting",
            TransferState::Confirming => "confirming",
            TransferState::Succeeded => "succeeded",
            TransferState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Write side of a request's state channel, handed to the transfer paths.
#[derive(Debug, Clone)]
pub struct TransferProgress {
    tx: Option<std::sync::Arc<watch::Sender<TransferState>>>,
}

impl TransferProgress {
    pub fn new(tx: watch::Sender<TransferState>) -> Self {
        Self { tx: Some(std::sync::Arc::new(tx)) }
    }

    /// Progress sink that nobody observes.
    pub fn detached() -> Self {
        Self { tx: None }
    }

    /// Move to `state`. Terminal states are sticky.
    pub fn set(&self, state: TransferState) {
        if let Some(tx) = &self.tx {
            tx.send_if_modified(|current| {
                if current.is_terminal() || *current == state {
                    false
                } else {
                    *current = state;
                    true
                }
            });
        }
    }

    pub fn current(&self) -> TransferState {
        self.tx.as_ref().map(|tx| *tx.borrow()).unwrap_or(TransferState::Idle)
    }
}
