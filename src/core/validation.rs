use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::errors::WalletError;

/// The only chain name routed to the Solana path.
pub const SOLANA_CHAIN_NAME: &str = "Solana Mainnet";

static EVM_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("Hardcoded regex should always compile")
});

static DECIMAL_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0|[1-9][0-9]*)(?:\.([0-9]+))?$").expect("Decimal regex pattern should always be valid")
});

/// Shape check for an EVM address: `0x` followed by 40 hex digits, any casing.
///
/// No EIP-55 checksum verification is done; a mixed-case address with a wrong
/// checksum is still accepted.
pub fn validate_evm_address(address: &str) -> bool {
    address.starts_with("0x") && address.len() == 42 && EVM_ADDRESS.is_match(address)
}

/// Shape check for a Solana address: exactly 44 characters of valid base58.
pub fn validate_solana_address(address: &str) -> bool {
    address.len() == 44 && bs58::decode(address).into_vec().is_ok()
}

/// Validates an address for the chain it will be sent on.
pub fn validate_address(address: &str, chain_name: &str) -> bool {
    if is_solana_chain(chain_name) {
        validate_solana_address(address)
    } else {
        validate_evm_address(address)
    }
}

pub fn is_solana_chain(chain_name: &str) -> bool {
    chain_name == SOLANA_CHAIN_NAME
}

/// Like [`validate_evm_address`] but yields a typed error naming the role of the address.
pub fn require_evm_address(address: &str, role: &str) -> Result<(), WalletError> {
    if validate_evm_address(address) {
        Ok(())
    } else {
        Err(WalletError::InvalidAddress(format!("{} address '{}' is not a valid EVM address", role, address)))
    }
}

/// Strict decimal check: digits with an optional fractional part, no sign, no exponent,
/// no leading zeros, strictly positive.
pub fn validate_amount_strict(amount: &str) -> Result<(), WalletError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(WalletError::InvalidAmount("amount cannot be empty".into()));
    }
    if !DECIMAL_AMOUNT.is_match(amount) {
        return Err(WalletError::InvalidAmount(format!("'{}' is not a decimal number", amount)));
    }
    if amount.trim_matches('0').trim_matches('.').is_empty() {
        return Err(WalletError::InvalidAmount("amount must be positive".into()));
    }
    Ok(())
}
