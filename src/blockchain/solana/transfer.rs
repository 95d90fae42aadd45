//! Native SOL and SPL token transfers.

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
#[allow(deprecated)]
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account;
use tracing::{debug, error, info};

use super::keypair::parse_keypair;
use super::rpc::{accepted_signature, SolanaRpcClient, SOLANA_MAINNET_RPC};
use crate::blockchain::client::ClientConfig;
use crate::blockchain::traits::TransferPath;
use crate::core::amount::to_base_units_u64;
use crate::core::domain::{TransferDetails, TransferProgress, TransferRequest, TransferResult, TransferState};
use crate::core::errors::WalletError;
use crate::core::registry::{ChainRecord, TokenRecord};

pub struct SolanaTransferPath {
    client: ClientConfig,
}

impl SolanaTransferPath {
    /// Always the public mainnet endpoint; the registry's `rpc` is not consulted.
    pub fn mainnet(timeout_secs: u64) -> Self {
        Self { client: ClientConfig::new(SOLANA_MAINNET_RPC, timeout_secs) }
    }

    /// Point at another JSON-RPC endpoint, e.g. a local mock.
    pub fn with_endpoint(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self { client: ClientConfig::new(endpoint, timeout_secs) }
    }

    pub fn endpoint(&self) -> &str {
        &self.client.endpoint
    }
}

fn parse_pubkey(value: &str, what: &str) -> Result<Pubkey, WalletError> {
    value
        .parse::<Pubkey>()
        .map_err(|e| WalletError::InvalidAddress(format!("{} '{}': {}", what, value, e)))
}

/// Instructions for one transfer. The only network read is the recipient ATA check.
#[allow(deprecated)]
pub async fn build_instructions(
    rpc: &SolanaRpcClient,
    sender: &Pubkey,
    recipient: &Pubkey,
    token: &TokenRecord,
    amount: &str,
) -> Result<Vec<Instruction>, WalletError> {
    let units = to_base_units_u64(amount, token.decimals)?;
    if token.is_native {
        return Ok(vec![system_instruction::transfer(sender, recipient, units)]);
    }

    let mint = parse_pubkey(token.require_contract()?, "mint")?;
    let from_ata = get_associated_token_address(sender, &mint);
    let to_ata = get_associated_token_address(recipient, &mint);

    let mut instructions = Vec::with_capacity(2);
    if !rpc.account_exists(&to_ata).await? {
        debug!(account = %to_ata, "recipient token account absent, creating it");
        instructions.push(create_associated_token_account(sender, recipient, &mint, &spl_token::id()));
    }
    let transfer = spl_token::instruction::transfer_checked(
        &spl_token::id(),
        &from_ata,
        &mint,
        &to_ata,
        sender,
        &[],
        units,
        token.decimals,
    )
    .map_err(|e| WalletError::Other(format!("cannot build token transfer: {}", e)))?;
    instructions.push(transfer);
    Ok(instructions)
}

/// Compile a legacy message paid by `payer` and sign it.
pub(crate) fn signed_transaction(
    instructions: &[Instruction],
    payer: &Keypair,
    blockhash: Hash,
) -> Result<Transaction, WalletError> {
    let message = Message::new_with_blockhash(instructions, Some(&payer.pubkey()), &blockhash);
    let mut tx = Transaction::new_unsigned(message);
    tx.try_sign(&[payer], blockhash)
        .map_err(|e| WalletError::SigningFailed(format!("solana transaction: {}", e)))?;
    Ok(tx)
}

#[async_trait]
impl TransferPath for SolanaTransferPath {
    fn name(&self) -> &'static str {
        "solana"
    }

    async fn transfer(
        &self,
        request: &TransferRequest,
        chain: &ChainRecord,
        token: &TokenRecord,
        progress: &TransferProgress,
    ) -> Result<TransferResult, WalletError> {
        progress.set(TransferState::Validating);
        let keypair = request.with_private_key(parse_keypair)?;
        let sender = keypair.pubkey();
        let recipient = parse_pubkey(&request.to_address, "recipient")?;
        let rpc = SolanaRpcClient::new(&self.client)?;

        info!(
            from = %sender,
            to = %recipient,
            coin = %token.coin_name,
            native = token.is_native,
            "building solana transfer"
        );
        let instructions = build_instructions(&rpc, &sender, &recipient, token, &request.amount).await?;

        progress.set(TransferState::Submitting);
        let blockhash = rpc.get_latest_blockhash().await?;
        let tx = signed_transaction(&instructions, &keypair, blockhash)?;
        let response = rpc.send_transaction(&tx).await?;

        progress.set(TransferState::Confirming);
        match accepted_signature(&response) {
            Some(signature) => {
                info!(signature, "solana transfer accepted");
                Ok(TransferResult::succeeded(
                    signature,
                    TransferDetails {
                        from_address: sender.to_string(),
                        to_address: recipient.to_string(),
                        amount: request.amount.clone(),
                        chain_name: chain.chain_name.clone(),
                        coin_name: token.coin_name.clone(),
                    },
                    None,
                ))
            }
            None => {
                let raw = response.to_string();
                error!(response = %raw, "solana transfer rejected");
                Ok(TransferResult::failed(raw))
            }
        }
    }
}
