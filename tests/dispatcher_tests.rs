mod util;

use std::sync::Arc;

use httpmock::prelude::*;
use my_wallet_tool::blockchain::ethereum::EvmTransferPath;
use my_wallet_tool::blockchain::solana::SolanaTransferPath;
use my_wallet_tool::core::config::EvmConfig;
use my_wallet_tool::core::domain::{TransferRequest, TransferState};
use my_wallet_tool::core::keygen::{generate_evm_keypair, generate_sol_address};
use my_wallet_tool::service::{MemoryEventLog, TransferDispatcher};
use serde_json::json;
use solana_sdk::signature::Keypair;
use util::Fixture;

fn dispatcher(fx: &Fixture, solana_endpoint: String, log: Arc<MemoryEventLog>) -> TransferDispatcher {
    let evm = EvmConfig { rpc_timeout_secs: 2, receipt_timeout_secs: 5, poll_interval_ms: 50 };
    TransferDispatcher::with_paths(
        fx.store(),
        Arc::new(EvmTransferPath::new(evm)),
        Arc::new(SolanaTransferPath::with_endpoint(solana_endpoint, 5)),
        log,
    )
}

fn signature_b58() -> String {
    bs58::encode([9u8; 64]).into_string()
}

#[tokio::test]
async fn solana_native_transfer_end_to_end() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("getLatestBlockhash");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0", "id": 1,
                "result": {"context": {"slot": 42},
                           "value": {"blockhash": bs58::encode([3u8; 32]).into_string(),
                                     "lastValidBlockHeight": 500}}
            }));
        })
        .await;
    let send = server
        .mock_async(|when, then| {
            when.method(POST).body_contains("sendTransaction").body_contains("\"encoding\":\"base64\"");
            then.status(200).json_body(json!({"jsonrpc": "2.0", "id": 1, "result": signature_b58()}));
        })
        .await;

    let fx = Fixture::new();
    let log = Arc::new(MemoryEventLog::new());
    let d = dispatcher(&fx, server.url("/"), log.clone());

    let key = Keypair::new().to_base58_string();
    let to = generate_sol_address();
    let handle = d.submit(TransferRequest::new(key.clone(), to.clone(), "Solana Mainnet", "SOL", "0.0001"));
    let states = handle.subscribe();
    let result = handle.wait().await;

    send.assert_async().await;
    assert!(result.success(), "unexpected failure: {:?}", result.error());
    let hash = result.tx_hash().unwrap();
    assert_eq!(bs58::decode(hash).into_vec().unwrap().len(), 64);
    assert_eq!(result.chain_name(), Some("Solana Mainnet"));
    assert_eq!(result.amount(), Some("0.0001"));
    assert_eq!(*states.borrow(), TransferState::Succeeded);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert!(json.get("error").is_none());

    for entry in log.entries() {
        assert!(!entry.message.contains(&key));
    }
}

#[tokio::test]
async fn unknown_chain_fails_before_any_network_call() {
    let server = MockServer::start_async().await;
    let any_call = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({"jsonrpc": "2.0", "id": 1, "result": null}));
        })
        .await;

    let fx = Fixture::new();
    let d = dispatcher(&fx, server.url("/"), Arc::new(MemoryEventLog::new()));
    let key = generate_evm_keypair();
    let result = d
        .transfer(key.secret(), "0x742d35Cc6634C0532925a3b844Bc454e4438f44e", "Ethereum Mainnet", "ETH", "0.01")
        .await;

    any_call.assert_hits_async(0).await;
    assert!(!result.success());
    assert!(result.tx_hash().is_none());
    let error = result.error().unwrap();
    assert!(error.starts_with("Ethereum Mainnet transfer failed: "), "{}", error);
    assert!(error.contains("does not exist"));
}

#[tokio::test]
async fn unreachable_evm_node_is_a_prefixed_failure() {
    let fx = Fixture::new();
    let d = dispatcher(&fx, "http://127.0.0.1:9".to_string(), Arc::new(MemoryEventLog::new()));
    let key = generate_evm_keypair();
    let result = d
        .transfer(key.secret(), "0x742d35Cc6634C0532925a3b844Bc454e4438f44e", "BSC Mainnet", "BNB", "0.01")
        .await;

    assert!(!result.success());
    assert!(result.tx_hash().is_none());
    assert!(result.error().unwrap().starts_with("BSC Mainnet transfer failed: "));
}

#[tokio::test]
async fn bad_solana_key_is_a_key_format_failure() {
    let server = MockServer::start_async().await;
    let fx = Fixture::new();
    let d = dispatcher(&fx, server.url("/"), Arc::new(MemoryEventLog::new()));
    let result = d.transfer("not-a-key!!", generate_sol_address(), "Solana Mainnet", "SOL", "1").await;

    assert!(!result.success());
    let error = result.error().unwrap();
    assert!(error.starts_with("Solana Mainnet transfer failed: "));
    assert!(error.contains("key format"), "{}", error);
}

#[tokio::test]
async fn result_invariants_hold_for_failures() {
    let fx = Fixture::new();
    let d = dispatcher(&fx, "http://127.0.0.1:9".to_string(), Arc::new(MemoryEventLog::new()));
    for (chain, coin) in [("Nowhere", "X"), ("BSC Mainnet", "NOPE"), ("Solana Mainnet", "BONK")] {
        let r = d.transfer("k", "to", chain, coin, "1").await;
        assert!(!r.success());
        assert!(r.error().is_some());
        assert!(r.tx_hash().is_none());
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("tx_hash").is_some(), "tx_hash must always be serialized");
        assert!(json["tx_hash"].is_null());
    }
}
