// RPC client configuration shared by the EVM and Solana paths.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::WalletError;

/// Configuration for a blockchain RPC client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// RPC endpoint URL (e.g. "http://localhost:8545")
    pub endpoint: String,
    /// Timeout in seconds for requests
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { endpoint: "http://localhost:8545".to_string(), timeout: 30 }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self { endpoint: endpoint.into().trim().to_string(), timeout: timeout_secs }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Parsed endpoint; a malformed URL in the registry is a config problem, not a network one.
    pub fn endpoint_url(&self) -> Result<reqwest::Url, WalletError> {
        reqwest::Url::parse(&self.endpoint).map_err(|e| {
            WalletError::ConfigError(format!("invalid RPC URL '{}': {}", self.endpoint, e))
        })
    }

    /// reqwest client with the request timeout; honours HTTPS_PROXY / HTTP_PROXY.
    pub fn http_client(&self) -> Result<reqwest::Client, WalletError> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout());
        if let Ok(proxy) = std::env::var("HTTPS_PROXY").or_else(|_| std::env::var("HTTP_PROXY")) {
            if let Ok(p) = reqwest::Proxy::all(proxy) {
                builder = builder.proxy(p);
            }
        }
        builder
            .build()
            .map_err(|e| WalletError::NetworkError(format!("failed to build HTTP client: {}", e)))
    }
}
