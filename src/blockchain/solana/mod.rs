//! Solana transfer path.
//!
//! Keys, instructions and transaction signing come from `solana-sdk`, `spl-token`
//! and `spl-associated-token-account`. JSON-RPC goes over a small reqwest client.

pub mod keypair;
pub mod rpc;
pub mod transfer;

pub use keypair::{keypair_from_bytes, parse_keypair, KeypairError};
pub use rpc::{SolanaRpcClient, SOLANA_MAINNET_RPC};
pub use transfer::{build_instructions, SolanaTransferPath};
