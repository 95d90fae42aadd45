// tests/util.rs
// Shared registry fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use my_wallet_tool::core::registry::RegistryStore;
use tempfile::TempDir;

pub const CHAINS: &str = r#"{
  "evm_chains": [
    { "chainName": "BSC Mainnet", "rpc": "http://127.0.0.1:9", "chain_id": 56 }
  ],
  "solana_chains": [
    { "chainName": "Solana Mainnet", "rpc": "https://api.mainnet-beta.solana.com" }
  ],
  "testnet_chains": [
    { "chainName": "Sepolia Testnet", "rpc": "http://127.0.0.1:9", "chain_id": "11155111" }
  ]
}"#;

pub const TOKENS: &str = r#"{
  "tokens": [
    { "chainName": "BSC Mainnet", "coinName": "BNB", "isNative": true, "decimals": 18 },
    { "chainName": "BSC Mainnet", "coinName": "USDT", "isNative": false,
      "contractAddress": "0x55d398326f99059fF775485246999027B3197955", "decimals": 18 },
    { "chainName": "Solana Mainnet", "coinName": "SOL", "isNative": true, "decimals": 9 },
    { "chainName": "Sepolia Testnet", "coinName": "ETH", "isNative": true, "decimals": 18 }
  ]
}"#;

/// Registry files in a temp dir. Keep the `TempDir` alive for the test's duration.
pub struct Fixture {
    pub dir: TempDir,
    pub chain_file: PathBuf,
    pub token_file: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_documents(CHAINS, TOKENS)
    }

    pub fn with_documents(chains: &str, tokens: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let chain_file = dir.path().join("chain.json");
        let token_file = dir.path().join("contract.json");
        std::fs::write(&chain_file, chains).expect("write chain.json");
        std::fs::write(&token_file, tokens).expect("write contract.json");
        Self { dir, chain_file, token_file }
    }

    pub fn store(&self) -> RegistryStore {
        RegistryStore::new(&self.chain_file, &self.token_file)
    }
}
