//! Parsing the key encodings Solana wallets export into an SDK [`Keypair`].

use solana_sdk::signature::{keypair_from_seed, Keypair, Signer};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::core::errors::WalletError;

#[derive(Debug, Error)]
pub enum KeypairError {
    #[error("private key is empty")]
    Empty,
    #[error("byte array is not valid JSON: {0}")]
    InvalidArray(String),
    #[error("hex key is not valid hex")]
    InvalidHex,
    #[error("key is neither hex nor base58")]
    InvalidBase58,
    #[error("expected 32 or 64 key bytes, got {0}")]
    WrongLength(usize),
    #[error("seed rejected: {0}")]
    InvalidSeed(String),
    #[error("public half of the keypair does not match its secret half")]
    Mismatch,
}

impl From<KeypairError> for WalletError {
    fn from(err: KeypairError) -> Self {
        WalletError::InvalidPrivateKey(format!("Solana key format error: {}", err))
    }
}

/// Accepts a JSON byte array (`[12, 34, ...]`), 64 hex characters, or base58.
/// Each form may hold a 64-byte keypair or a 32-byte seed.
pub fn parse_keypair(input: &str) -> Result<Keypair, KeypairError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(KeypairError::Empty);
    }

    let bytes: Zeroizing<Vec<u8>> = if input.starts_with('[') {
        let parsed: Vec<u8> =
            serde_json::from_str(input).map_err(|e| KeypairError::InvalidArray(e.to_string()))?;
        Zeroizing::new(parsed)
    } else if input.len() == 64 && input.chars().all(|c| c.is_ascii_hexdigit()) {
        Zeroizing::new(hex::decode(input).map_err(|_| KeypairError::InvalidHex)?)
    } else {
        Zeroizing::new(bs58::decode(input).into_vec().map_err(|_| KeypairError::InvalidBase58)?)
    };

    keypair_from_bytes(&bytes)
}

/// A 32-byte seed, or a 64-byte `secret || public` keypair whose halves must agree.
pub fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair, KeypairError> {
    match bytes.len() {
        32 | 64 => {
            let keypair =
                keypair_from_seed(&bytes[..32]).map_err(|e| KeypairError::InvalidSeed(e.to_string()))?;
            if bytes.len() == 64 && keypair.pubkey().to_bytes()[..] != bytes[32..] {
                return Err(KeypairError::Mismatch);
            }
            Ok(keypair)
        }
        n => Err(KeypairError::WrongLength(n)),
    }
}
