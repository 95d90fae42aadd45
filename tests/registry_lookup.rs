mod util;

use my_wallet_tool::core::errors::ErrorKind;
use my_wallet_tool::core::registry::{ChainCategory, RegistryDocument};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use util::Fixture;

#[test]
fn resolves_each_category() {
    let fx = Fixture::new();
    let store = fx.store();

    let (chain, token) = store.resolve("BSC Mainnet", "USDT").unwrap();
    assert_eq!(chain.category, ChainCategory::EvmMainnet);
    assert_eq!(chain.chain_id, Some(56));
    assert!(!token.is_native);
    assert_eq!(token.contract_address.as_deref(), Some("0x55d398326f99059fF775485246999027B3197955"));

    let (chain, _) = store.resolve("Solana Mainnet", "SOL").unwrap();
    assert_eq!(chain.category, ChainCategory::Solana);
    assert_eq!(chain.chain_id, None);

    let (chain, _) = store.resolve("Sepolia Testnet", "ETH").unwrap();
    assert_eq!(chain.category, ChainCategory::EvmTestnet);
    assert_eq!(chain.chain_id, Some(11_155_111));
}

#[test]
fn missing_chain_and_missing_token_are_config_not_found() {
    let fx = Fixture::new();
    let store = fx.store();

    let err = store.resolve("Ethereum Mainnet", "ETH").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
    assert!(err.to_string().contains("Ethereum Mainnet"));

    let err = store.resolve("BSC Mainnet", "CAKE").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
    assert!(err.to_string().contains("CAKE"));
}

#[test]
fn edits_are_visible_without_reloading() {
    let fx = Fixture::new();
    let store = fx.store();
    assert!(store.resolve("BSC Mainnet", "CAKE").is_err());

    let updated = util::TOKENS.replace(
        r#""tokens": ["#,
        r#""tokens": [
    { "chainName": "BSC Mainnet", "coinName": "CAKE", "isNative": false,
      "contractAddress": "0x0E09FaBB73Bd3Ade0a17ECC321fD13a19e81cE82", "decimals": 18 },"#,
    );
    store.import(RegistryDocument::Tokens, &updated).unwrap();
    let (_, token) = store.resolve("BSC Mainnet", "CAKE").unwrap();
    assert_eq!(token.decimals, 18);
}

#[test]
fn malformed_import_keeps_existing_file() {
    let fx = Fixture::new();
    let store = fx.store();
    let before = std::fs::read_to_string(&fx.chain_file).unwrap();

    let err = store.import(RegistryDocument::Chains, "{ not json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(std::fs::read_to_string(&fx.chain_file).unwrap(), before);
}

#[test]
fn missing_category_keys_are_empty_lists() {
    let fx = Fixture::with_documents(
        r#"{"solana_chains": [{"chainName": "Solana Mainnet", "rpc": "x"}]}"#,
        r#"{"tokens": []}"#,
    );
    let chains = fx.store().list_chains().unwrap();
    assert_eq!(chains.len(), 1);
    assert!(fx.store().list_tokens(None).unwrap().is_empty());
}

#[test]
fn list_tokens_filters_by_chain() {
    let fx = Fixture::new();
    let coins: Vec<String> =
        fx.store().list_tokens(Some("BSC Mainnet")).unwrap().into_iter().map(|t| t.coin_name).collect();
    assert_eq!(coins, vec!["BNB".to_string(), "USDT".to_string()]);
}

proptest! {
    #[test]
    fn unknown_chain_names_never_resolve(name in "[A-Za-z ]{1,24}") {
        prop_assume!(!["BSC Mainnet", "Solana Mainnet", "Sepolia Testnet"].contains(&name.as_str()));
        let fx = Fixture::new();
        let err = fx.store().resolve(&name, "BNB").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
        prop_assert!(err.to_string().contains(&name));
    }
}
