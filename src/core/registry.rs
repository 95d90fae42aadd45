//! Chain and token registries backed by two JSON documents.
//!
//! Both files are read from disk on every lookup, so edits made through
//! `registry import` (or by hand) apply to the next transfer.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::core::errors::WalletError;

/// Which list of the chain registry a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainCategory {
    EvmMainnet,
    EvmTestnet,
    Solana,
}

impl ChainCategory {
    /// Registry key of the list holding this category.
    pub fn registry_key(&self) -> &'static str {
        match self {
            ChainCategory::EvmMainnet => "evm_chains",
            ChainCategory::EvmTestnet => "testnet_chains",
            ChainCategory::Solana => "solana_chains",
        }
    }

    pub fn is_evm(&self) -> bool {
        matches!(self, ChainCategory::EvmMainnet | ChainCategory::EvmTestnet)
    }
}

impl fmt::Display for ChainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChainCategory::EvmMainnet => "evm-mainnet",
            ChainCategory::EvmTestnet => "evm-testnet",
            ChainCategory::Solana => "solana",
        };
        f.write_str(label)
    }
}

/// One entry of the chain registry as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    #[serde(rename = "chainName")]
    pub chain_name: String,
    pub rpc: String,
    #[serde(
        default,
        deserialize_with = "deserialize_chain_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub chain_id: Option<u64>,
}

/// A resolved chain: the on-disk entry plus the list it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainRecord {
    pub chain_name: String,
    pub rpc_url: String,
    pub chain_id: Option<u64>,
    pub category: ChainCategory,
}

impl ChainRecord {
    fn from_entry(entry: &ChainEntry, category: ChainCategory) -> Self {
        Self {
            chain_name: entry.chain_name.clone(),
            rpc_url: entry.rpc.clone(),
            chain_id: entry.chain_id,
            category,
        }
    }

    /// EVM chain id; EVM transfers cannot be signed without one.
    pub fn require_chain_id(&self) -> Result<u64, WalletError> {
        self.chain_id.ok_or_else(|| {
            WalletError::ConfigError(format!("chain '{}' has no chain_id", self.chain_name))
        })
    }
}

/// `chain.json`: three lists of chains, any of which may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRegistry {
    #[serde(default)]
    pub evm_chains: Vec<ChainEntry>,
    #[serde(default)]
    pub solana_chains: Vec<ChainEntry>,
    #[serde(default)]
    pub testnet_chains: Vec<ChainEntry>,
}

impl ChainRegistry {
    /// Scans `evm_chains`, `solana_chains`, `testnet_chains` in that order.
    pub fn find(&self, chain_name: &str) -> Option<ChainRecord> {
        self.iter().find(|record| record.chain_name == chain_name)
    }

    /// Every chain, tagged with its category, in scan order.
    pub fn iter(&self) -> impl Iterator<Item = ChainRecord> + '_ {
        let evm = self.evm_chains.iter().map(|e| ChainRecord::from_entry(e, ChainCategory::EvmMainnet));
        let sol = self.solana_chains.iter().map(|e| ChainRecord::from_entry(e, ChainCategory::Solana));
        let test =
            self.testnet_chains.iter().map(|e| ChainRecord::from_entry(e, ChainCategory::EvmTestnet));
        evm.chain(sol).chain(test)
    }

    pub fn len(&self) -> usize {
        self.evm_chains.len() + self.solana_chains.len() + self.testnet_chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of the token registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(rename = "chainName")]
    pub chain_name: String,
    #[serde(rename = "coinName")]
    pub coin_name: String,
    #[serde(rename = "isNative", default)]
    pub is_native: bool,
    #[serde(rename = "contractAddress", default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    pub decimals: u8,
}

impl TokenRecord {
    /// Contract (EVM) or mint (Solana) address of a non-native token.
    pub fn require_contract(&self) -> Result<&str, WalletError> {
        self.contract_address.as_deref().filter(|a| !a.is_empty()).ok_or_else(|| {
            WalletError::ConfigError(format!(
                "token '{}' on '{}' is not native but has no contractAddress",
                self.coin_name, self.chain_name
            ))
        })
    }
}

/// `contract.json`: a flat list of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRegistry {
    #[serde(default)]
    pub tokens: Vec<TokenRecord>,
}

impl TokenRegistry {
    pub fn find(&self, chain_name: &str, coin_name: &str) -> Option<&TokenRecord> {
        self.tokens.iter().find(|t| t.chain_name == chain_name && t.coin_name == coin_name)
    }

    pub fn for_chain<'a>(&'a self, chain_name: &'a str) -> impl Iterator<Item = &'a TokenRecord> {
        self.tokens.iter().filter(move |t| t.chain_name == chain_name)
    }
}

/// Which of the two registry documents an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryDocument {
    Chains,
    Tokens,
}

/// File-backed access to both registries.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    chain_file: PathBuf,
    token_file: PathBuf,
}

impl RegistryStore {
    pub fn new(chain_file: impl Into<PathBuf>, token_file: impl Into<PathBuf>) -> Self {
        Self { chain_file: chain_file.into(), token_file: token_file.into() }
    }

    pub fn chain_file(&self) -> &Path {
        &self.chain_file
    }

    pub fn token_file(&self) -> &Path {
        &self.token_file
    }

    fn path_of(&self, doc: RegistryDocument) -> &Path {
        match doc {
            RegistryDocument::Chains => &self.chain_file,
            RegistryDocument::Tokens => &self.token_file,
        }
    }

    pub fn load_chains(&self) -> Result<ChainRegistry, WalletError> {
        read_json(&self.chain_file)
    }

    pub fn load_tokens(&self) -> Result<TokenRegistry, WalletError> {
        read_json(&self.token_file)
    }

    /// Resolve a (chain, coin) pair. Both files are read fresh on every call.
    pub fn resolve(
        &self,
        chain_name: &str,
        coin_name: &str,
    ) -> Result<(ChainRecord, TokenRecord), WalletError> {
        let chains = self.load_chains()?;
        let tokens = self.load_tokens()?;

        let chain = chains
            .find(chain_name)
            .ok_or_else(|| WalletError::ChainNotFound(chain_name.to_string()))?;
        let token = tokens.find(chain_name, coin_name).cloned().ok_or_else(|| {
            WalletError::TokenNotFound { chain: chain_name.to_string(), coin: coin_name.to_string() }
        })?;

        debug!(chain = %chain.chain_name, category = %chain.category, coin = %token.coin_name, "registry lookup hit");
        Ok((chain, token))
    }

    pub fn list_chains(&self) -> Result<Vec<ChainRecord>, WalletError> {
        Ok(self.load_chains()?.iter().collect())
    }

    pub fn list_tokens(&self, chain_name: Option<&str>) -> Result<Vec<TokenRecord>, WalletError> {
        let tokens = self.load_tokens()?;
        Ok(match chain_name {
            Some(chain) => tokens.for_chain(chain).cloned().collect(),
            None => tokens.tokens,
        })
    }

    /// Pretty-printed document as it would be shown for editing.
    pub fn show(&self, doc: RegistryDocument) -> Result<String, WalletError> {
        let rendered = match doc {
            RegistryDocument::Chains => serde_json::to_string_pretty(&self.load_chains()?)?,
            RegistryDocument::Tokens => serde_json::to_string_pretty(&self.load_tokens()?)?,
        };
        Ok(rendered)
    }

    /// Validate `contents` against the registry schema and overwrite the file.
    ///
    /// A document that does not parse leaves the existing file untouched.
    pub fn import(&self, doc: RegistryDocument, contents: &str) -> Result<(), WalletError> {
        let normalized = match doc {
            RegistryDocument::Chains => {
                let parsed: ChainRegistry = parse_json(contents, "chain registry")?;
                serde_json::to_string_pretty(&parsed)?
            }
            RegistryDocument::Tokens => {
                let parsed: TokenRegistry = parse_json(contents, "token registry")?;
                serde_json::to_string_pretty(&parsed)?
            }
        };

        let path = self.path_of(doc);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, normalized)?;
        info!(path = %path.display(), "registry document saved");
        Ok(())
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, WalletError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        WalletError::ConfigError(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_json(&raw, &path.display().to_string())
}

fn parse_json<T: for<'de> Deserialize<'de>>(raw: &str, what: &str) -> Result<T, WalletError> {
    serde_json::from_str(raw)
        .map_err(|e| WalletError::ConfigError(format!("malformed {}: {}", what, e)))
}

/// `chain_id` shows up both as `56` and as `"56"` in hand-edited registries.
fn deserialize_chain_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        Num(u64),
        Str(String),
    }

    match Option::<NumOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrString::Num(n)) => Ok(Some(n)),
        Some(NumOrString::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(NumOrString::Str(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("chain_id '{}' is not a number", s))),
    }
}
