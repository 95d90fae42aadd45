use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use ethers::{
    prelude::JsonRpcClient,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{
        transaction::eip2718::TypedTransaction, Address, Bytes, TransactionReceipt,
        TransactionRequest, H256, U256, U64,
    },
    utils::to_checksum,
};
use tracing::{debug, error, info, warn};

use super::client::ClientConfig;
use super::traits::TransferPath;
use crate::core::abi::encode_erc20_transfer;
use crate::core::amount::to_base_units;
use crate::core::config::EvmConfig;
use crate::core::domain::{TransferDetails, TransferProgress, TransferRequest, TransferResult, TransferState};
use crate::core::errors::WalletError;
use crate::core::registry::{ChainRecord, TokenRecord};
use crate::core::validation::{require_evm_address, validate_evm_address};
use crate::security::redaction::shorten_address;
use crate::tools::async_support::{AsyncExecutor, TimeoutConfig};

pub const NATIVE_GAS_LIMIT: u64 = 21_000;
pub const ERC20_GAS_LIMIT: u64 = 100_000;
pub const REVERTED_ERROR: &str = "transaction execution failed";

/// Receipt polling knobs.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ReceiptPolicy {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(120), poll_interval: Duration::from_secs(2) }
    }
}

impl From<&EvmConfig> for ReceiptPolicy {
    fn from(cfg: &EvmConfig) -> Self {
        Self {
            timeout: Duration::from_secs(cfg.receipt_timeout_secs),
            poll_interval: Duration::from_millis(cfg.poll_interval_ms.max(1)),
        }
    }
}

/// JSON-RPC client for one EVM chain.
#[derive(Clone)]
pub struct EvmClient<P: JsonRpcClient + Clone = Http> {
    provider: Provider<P>,
    chain_name: String,
    receipts: ReceiptPolicy,
}

impl EvmClient<Http> {
    /// HTTP client for `config.endpoint`. Does not touch the network.
    pub fn connect(config: &ClientConfig, chain_name: &str, receipts: ReceiptPolicy) -> Result<Self, WalletError> {
        let url = config.endpoint_url()?;
        info!(chain = chain_name, url = %url, "connecting to EVM RPC");
        let provider = Provider::new(Http::new_with_client(url, config.http_client()?));
        Ok(Self { provider, chain_name: chain_name.to_string(), receipts })
    }
}

impl<P> EvmClient<P>
where
    P: JsonRpcClient + Clone + Send + Sync,
{
    /// Wrap an existing provider, e.g. a `MockProvider` in tests.
    pub fn new_with_provider(provider: Provider<P>, chain_name: &str, receipts: ReceiptPolicy) -> Self {
        Self { provider, chain_name: chain_name.to_string(), receipts }
    }

    /// `eth_chainId`, used as the reachability probe.
    pub async fn probe_chain_id(&self) -> Result<u64, WalletError> {
        let id = self.provider.get_chainid().await.map_err(|e| {
            WalletError::NetworkError(format!("cannot connect to {} RPC node: {}", self.chain_name, e))
        })?;
        Ok(id.as_u64())
    }

    pub async fn get_gas_price(&self) -> Result<U256, WalletError> {
        let v = self
            .provider
            .get_gas_price()
            .await
            .map_err(|e| WalletError::BlockchainError(format!("Failed to get gas price: {}", e)))?;
        debug!("get_gas_price got = 0x{:x}", v);
        Ok(v)
    }

    pub async fn get_nonce(&self, address: &Address) -> Result<U256, WalletError> {
        let v = self
            .provider
            .get_transaction_count(*address, None)
            .await
            .map_err(|e| WalletError::BlockchainError(format!("Failed to get nonce: {}", e)))?;
        debug!("get_nonce got = 0x{:x}", v);
        Ok(v)
    }

    /// Sign locally and broadcast with `eth_sendRawTransaction`.
    pub async fn sign_and_send(&self, wallet: &LocalWallet, tx: TypedTransaction) -> Result<H256, WalletError> {
        let signature = wallet
            .sign_transaction(&tx)
            .await
            .map_err(|e| WalletError::SigningFailed(e.to_string()))?;
        let raw: Bytes = tx.rlp_signed(&signature);
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| WalletError::TransactionFailed(format!("broadcast rejected: {}", e)))?;
        Ok(pending.tx_hash())
    }

    /// Poll `eth_getTransactionReceipt` until mined or the receipt timeout elapses.
    pub async fn wait_for_receipt(&self, tx_hash: H256) -> Result<TransactionReceipt, WalletError> {
        let poll = async {
            loop {
                match self.provider.get_transaction_receipt(tx_hash).await {
                    Ok(Some(receipt)) => return Ok(receipt),
                    Ok(None) => debug!(tx_hash = %format_hash(&tx_hash), "receipt not available yet"),
                    Err(e) => {
                        return Err(WalletError::BlockchainError(format!(
                            "Failed to get transaction receipt: {}",
                            e
                        )))
                    }
                }
                tokio::time::sleep(self.receipts.poll_interval).await;
            }
        };
        AsyncExecutor::execute_with_timeout(poll, TimeoutConfig::new(self.receipts.timeout, "wait_for_receipt"))
            .await
    }

    /// Full EVM transfer: probe, build, sign, send, confirm.
    pub async fn execute_transfer(
        &self,
        request: &TransferRequest,
        chain: &ChainRecord,
        token: &TokenRecord,
        progress: &TransferProgress,
    ) -> Result<TransferResult, WalletError> {
        progress.set(TransferState::Validating);
        let chain_id = chain.require_chain_id()?;
        let node_chain_id = self.probe_chain_id().await?;
        if node_chain_id != chain_id {
            warn!(
                chain = %chain.chain_name,
                registry_chain_id = chain_id,
                node_chain_id,
                "RPC node reports a different chain id; signing with the registry value"
            );
        }

        let wallet = request
            .with_private_key(|k| LocalWallet::from_str(k.strip_prefix("0x").unwrap_or(k)))
            .map_err(|e| WalletError::InvalidPrivateKey(format!("cannot load EVM key: {}", e)))?
            .with_chain_id(chain_id);
        let from_address = to_checksum(&wallet.address(), None);
        if !validate_evm_address(&from_address) {
            return Err(WalletError::InvalidAddress(format!("sender address '{}' is malformed", from_address)));
        }
        require_evm_address(&request.to_address, "recipient")?;
        let to = Address::from_str(&request.to_address)
            .map_err(|e| WalletError::InvalidAddress(format!("recipient: {}", e)))?;

        let units = to_base_units(&request.amount, token.decimals)?;
        let nonce = self.get_nonce(&wallet.address()).await?;
        let gas_price = self.get_gas_price().await?;

        let base = TransactionRequest::new()
            .from(wallet.address())
            .nonce(nonce)
            .gas_price(gas_price)
            .chain_id(chain_id);
        let tx = if token.is_native {
            base.to(to).value(units).gas(NATIVE_GAS_LIMIT)
        } else {
            let contract = token.require_contract()?;
            require_evm_address(contract, "token contract")?;
            let contract = Address::from_str(contract)
                .map_err(|e| WalletError::ConfigError(format!("token contract: {}", e)))?;
            base.to(contract)
                .value(U256::zero())
                .data(encode_erc20_transfer(&request.to_address, units)?)
                .gas(ERC20_GAS_LIMIT)
        };

        info!(
            chain = %chain.chain_name,
            from = %shorten_address(&from_address),
            to = %shorten_address(&request.to_address),
            coin = %token.coin_name,
            native = token.is_native,
            nonce = %nonce,
            "submitting EVM transfer"
        );
        progress.set(TransferState::Submitting);
        let tx_hash = self.sign_and_send(&wallet, TypedTransaction::Legacy(tx)).await?;
        let hash = format_hash(&tx_hash);
        info!(tx_hash = %hash, "Transaction sent");

        progress.set(TransferState::Confirming);
        let receipt = self.wait_for_receipt(tx_hash).await?;
        if receipt.status == Some(U64::from(1)) {
            let block_number = receipt.block_number.map(|b| b.as_u64());
            info!(tx_hash = %hash, block_number = ?block_number, "transfer confirmed");
            Ok(TransferResult::succeeded(
                hash,
                TransferDetails {
                    from_address,
                    to_address: request.to_address.clone(),
                    amount: request.amount.clone(),
                    chain_name: chain.chain_name.clone(),
                    coin_name: request.coin_name.clone(),
                },
                block_number,
            ))
        } else {
            error!(tx_hash = %hash, status = ?receipt.status, "transfer reverted");
            Ok(TransferResult::reverted(hash, REVERTED_ERROR))
        }
    }
}

fn format_hash(hash: &H256) -> String {
    format!("0x{}", hex::encode(hash.as_bytes()))
}

/// The EVM path over HTTP, one client per request using the chain's registry RPC.
pub struct EvmTransferPath {
    config: EvmConfig,
}

impl EvmTransferPath {
    pub fn new(config: EvmConfig) -> Self {
        Self { config }
    }
}

impl Default for EvmTransferPath {
    fn default() -> Self {
        Self::new(EvmConfig::default())
    }
}

#[async_trait]
impl TransferPath for EvmTransferPath {
    fn name(&self) -> &'static str {
        "evm"
    }

    async fn transfer(
        &self,
        request: &TransferRequest,
        chain: &ChainRecord,
        token: &TokenRecord,
        progress: &TransferProgress,
    ) -> Result<TransferResult, WalletError> {
        let client_config = ClientConfig::new(chain.rpc_url.clone(), self.config.rpc_timeout_secs);
        let client = EvmClient::connect(&client_config, &chain.chain_name, ReceiptPolicy::from(&self.config))?;
        client.execute_transfer(request, chain, token, progress).await
    }
}
