use ethers::types::U256;
use sha3::{Digest, Keccak256};

use crate::core::errors::WalletError;

pub const ERC20_TRANSFER_SIGNATURE: &str = "transfer(address,uint256)";

/// Compute the first 4 bytes (function selector) from a signature string, e.g. "transfer(address,uint256)".
pub fn selector_from_signature(signature: &str) -> [u8; 4] {
    let mut keccak = Keccak256::new();
    keccak.update(signature.as_bytes());
    let out = keccak.finalize();
    [out[0], out[1], out[2], out[3]]
}

/// Encode a 20-byte hex address (with or without 0x) into a left-padded 32-byte ABI word.
pub fn abi_word_address(addr_hex: &str) -> Result<[u8; 32], WalletError> {
    let addr = addr_hex.strip_prefix("0x").unwrap_or(addr_hex);
    if addr.len() != 40 {
        return Err(WalletError::InvalidAddress(format!("'{}' is not 20 bytes of hex", addr_hex)));
    }
    let bytes = hex::decode(addr)
        .map_err(|_| WalletError::InvalidAddress(format!("'{}' contains non-hex characters", addr_hex)))?;
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(&bytes);
    Ok(out)
}

/// Big-endian 32-byte ABI word for a uint256.
pub fn abi_word_uint256(value: U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    out
}

/// Pack a selector and ABI words contiguously into calldata.
pub fn abi_pack(selector: [u8; 4], words: &[[u8; 32]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + 32 * words.len());
    out.extend_from_slice(&selector);
    for w in words {
        out.extend_from_slice(w);
    }
    out
}

/// Calldata for `transfer(recipient, amount)` on an ERC20 contract.
pub fn encode_erc20_transfer(recipient: &str, amount: U256) -> Result<Vec<u8>, WalletError> {
    let selector = selector_from_signature(ERC20_TRANSFER_SIGNATURE);
    let to = abi_word_address(recipient)?;
    Ok(abi_pack(selector, &[to, abi_word_uint256(amount)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_from_signature() {
        let sel = selector_from_signature(ERC20_TRANSFER_SIGNATURE);
        assert_eq!(sel, [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_abi_word_address_padding() {
        let word = abi_word_address("0x1111111111111111111111111111111111111111").unwrap();
        assert!(word[..12].iter().all(|&b| b == 0));
        assert!(word[12..].iter().all(|&b| b == 0x11));
        let word2 = abi_word_address("1111111111111111111111111111111111111111").unwrap();
        assert_eq!(word, word2);
        assert!(abi_word_address("0x11").is_err());
        assert!(abi_word_address("0x111111111111111111111111111111111111111z").is_err());
    }

    #[test]
    fn test_uint256_word_beyond_u128() {
        let big = U256::from(u128::MAX) + U256::one();
        let word = abi_word_uint256(big);
        assert_eq!(word[15], 1);
        assert!(word[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_erc20_transfer_layout() {
        let data = encode_erc20_transfer(
            "0x2222222222222222222222222222222222222222",
            U256::from(1_000_000u64),
        )
        .unwrap();
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(hex::encode(&data[0..4]), "a9059cbb");
        assert_eq!(&data[16..36], &[0x22u8; 20]);
        assert_eq!(
            hex::encode(&data[36..68]),
            "00000000000000000000000000000000000000000000000000000000000f4240"
        );
    }
}
