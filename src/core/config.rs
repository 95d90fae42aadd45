use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Where the two registry documents live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "RegistryConfig::default_chain_file")]
    pub chain_file: PathBuf,
    #[serde(default = "RegistryConfig::default_token_file")]
    pub token_file: PathBuf,
}

impl RegistryConfig {
    fn default_chain_file() -> PathBuf { PathBuf::from("config/chain.json") }
    fn default_token_file() -> PathBuf { PathBuf::from("config/contract.json") }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { chain_file: Self::default_chain_file(), token_file: Self::default_token_file() }
    }
}

/// EVM client timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvmConfig {
    /// Per-request HTTP timeout (seconds)
    #[serde(default = "EvmConfig::default_rpc_timeout")]
    pub rpc_timeout_secs: u64,

    /// Upper bound on waiting for a receipt after broadcast (seconds)
    #[serde(default = "EvmConfig::default_receipt_timeout")]
    pub receipt_timeout_secs: u64,

    /// Receipt polling interval (milliseconds)
    #[serde(default = "EvmConfig::default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl EvmConfig {
    fn default_rpc_timeout() -> u64 { 30 }
    fn default_receipt_timeout() -> u64 { 120 }
    fn default_poll_interval() -> u64 { 2_000 }
}

impl Default for EvmConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_secs: Self::default_rpc_timeout(),
            receipt_timeout_secs: Self::default_receipt_timeout(),
            poll_interval_ms: Self::default_poll_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolanaConfig {
    #[serde(default = "SolanaConfig::default_rpc_timeout")]
    pub rpc_timeout_secs: u64,
}

impl SolanaConfig {
    fn default_rpc_timeout() -> u64 { 30 }
}

impl Default for SolanaConfig {
    fn default() -> Self {
        Self { rpc_timeout_secs: Self::default_rpc_timeout() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when RUST_LOG is unset
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    /// Directory for daily rolling log files; console only when absent
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String { "info".to_string() }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: Self::default_level(), dir: None }
    }
}

/// Application configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub evm: EvmConfig,
    #[serde(default)]
    pub solana: SolanaConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub const DEFAULT_PATH: &'static str = "config.toml";

    /// Resolve the config path: explicit flag, then `CONFIG_PATH`, then `config.toml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(Self::DEFAULT_PATH))
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let parsed: AppConfig = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            parsed
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            AppConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// `WALLET_CHAIN_FILE`, `WALLET_TOKEN_FILE` and `WALLET_LOG_DIR` win over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("WALLET_CHAIN_FILE") {
            self.registry.chain_file = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("WALLET_TOKEN_FILE") {
            self.registry.token_file = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("WALLET_LOG_DIR") {
            self.logging.dir = Some(PathBuf::from(v));
        }
    }
}
