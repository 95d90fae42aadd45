use async_trait::async_trait;

use crate::core::domain::{TransferProgress, TransferRequest, TransferResult};
use crate::core::errors::WalletError;
use crate::core::registry::{ChainRecord, TokenRecord};

/// One chain family's way of moving funds.
///
/// `Ok` carries every outcome the chain itself reported, including a mined-but-reverted
/// transaction or a rejected broadcast. `Err` is for failures before or around the
/// chain call; the dispatcher turns those into failed results.
#[async_trait]
pub trait TransferPath: Send + Sync {
    /// Short label for logs ("evm", "solana").
    fn name(&self) -> &'static str;

    async fn transfer(
        &self,
        request: &TransferRequest,
        chain: &ChainRecord,
        token: &TokenRecord,
        progress: &TransferProgress,
    ) -> Result<TransferResult, WalletError>;
}
