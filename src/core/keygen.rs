//! Fresh key material for EVM and Solana.

use bip39::{Language, Mnemonic};
use ethers::signers::{LocalWallet, Signer};
use ethers::utils::to_checksum;
use rand_core::{OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use solana_sdk::signature::{Keypair, Signer as _};
use zeroize::Zeroize;

use crate::core::errors::WalletError;

/// An address together with the secret that controls it.
pub struct GeneratedKey {
    pub address: String,
    secret: SecretString,
}

impl GeneratedKey {
    /// Hex (EVM) or base58 64-byte keypair (Solana).
    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for GeneratedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedKey").field("address", &self.address).field("secret", &"***").finish()
    }
}

/// A mnemonic shown next to an EVM address.
///
/// The two are generated independently: the address is NOT derived from the
/// mnemonic, and importing the words elsewhere will not reach it.
#[derive(Debug, Clone, Serialize)]
pub struct WalletInfo {
    pub mnemonic: String,
    pub evm_address: String,
}

pub fn generate_evm_keypair() -> GeneratedKey {
    let wallet = LocalWallet::new(&mut OsRng);
    let mut secret_hex = hex::encode(wallet.signer().to_bytes());
    let key = GeneratedKey {
        address: to_checksum(&wallet.address(), None),
        secret: SecretString::new(format!("0x{}", secret_hex)),
    };
    secret_hex.zeroize();
    key
}

pub fn generate_solana_keypair() -> GeneratedKey {
    let keypair = Keypair::new();
    GeneratedKey {
        address: keypair.pubkey().to_string(),
        secret: SecretString::new(keypair.to_base58_string()),
    }
}

/// EIP-55 checksummed address of a fresh secp256k1 key. The key is discarded.
pub fn generate_evm_address() -> String {
    generate_evm_keypair().address
}

/// Base58 public key of a fresh ed25519 keypair. The key is discarded.
pub fn generate_sol_address() -> String {
    generate_solana_keypair().address
}

/// 12-word English mnemonic from 128 bits of OS entropy.
pub fn generate_mnemonic() -> Result<String, WalletError> {
    let mut entropy = [0u8; 16];
    OsRng.fill_bytes(&mut entropy);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| WalletError::MnemonicError(e.to_string()));
    entropy.zeroize();
    Ok(mnemonic?.to_string())
}

pub fn generate_wallet_info() -> Result<WalletInfo, WalletError> {
    Ok(WalletInfo { mnemonic: generate_mnemonic()?, evm_address: generate_evm_address() })
}
