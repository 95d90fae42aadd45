pub mod client;
pub mod ethereum;
pub mod solana;
pub mod traits;

pub use ethereum::{EvmClient, EvmTransferPath};
pub use solana::SolanaTransferPath;
pub use traits::TransferPath;
