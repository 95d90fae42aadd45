use std::fmt;

/// Custom error type for wallet operations.
#[derive(Debug)]
pub enum WalletError {
    /// Registry or application config file could not be read or parsed.
    ConfigError(String),
    /// Chain name absent from the chain registry.
    ChainNotFound(String),
    /// (chain, coin) pair absent from the token registry.
    TokenNotFound { chain: String, coin: String },
    /// Invalid address errors.
    InvalidAddress(String),
    /// Invalid private key errors.
    InvalidPrivateKey(String),
    /// Invalid amount errors.
    InvalidAmount(String),
    /// Invalid input errors.
    InvalidInput(String),
    /// RPC endpoint unreachable.
    NetworkError(String),
    /// RPC call rejected or returned garbage.
    BlockchainError(String),
    /// Transaction reverted or broadcast rejected.
    TransactionFailed(String),
    /// Timeout errors.
    TimeoutError(String),
    /// Signing failed errors.
    SigningFailed(String),
    /// Key generation failed errors.
    KeyGenerationFailed(String),
    /// Mnemonic generation/parsing errors.
    MnemonicError(String),
    /// IO errors.
    IoError(String),
    /// Serialization/deserialization errors.
    SerializationError(String),
    /// Generic errors.
    Other(String),
}

/// Coarse classification used by callers that only care about the failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigNotFound,
    InvalidInput,
    NetworkOrChain,
    Config,
    Internal,
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            WalletError::ChainNotFound(chain) => {
                write!(f, "Chain '{}' does not exist in the chain registry", chain)
            }
            WalletError::TokenNotFound { chain, coin } => {
                write!(f, "Token '{}' is not configured on chain '{}'", coin, chain)
            }
            WalletError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            WalletError::InvalidPrivateKey(msg) => write!(f, "Invalid private key: {}", msg),
            WalletError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            WalletError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            WalletError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            WalletError::BlockchainError(msg) => write!(f, "Blockchain error: {}", msg),
            WalletError::TransactionFailed(msg) => write!(f, "Transaction failed: {}", msg),
            WalletError::TimeoutError(msg) => write!(f, "Timeout error: {}", msg),
            WalletError::SigningFailed(msg) => write!(f, "Signing failed: {}", msg),
            WalletError::KeyGenerationFailed(msg) => write!(f, "Key generation failed: {}", msg),
            WalletError::MnemonicError(msg) => write!(f, "Mnemonic error: {}", msg),
            WalletError::IoError(msg) => write!(f, "IO error: {}", msg),
            WalletError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            WalletError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for WalletError {}

impl WalletError {
    /// Failure family of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::ChainNotFound(_) | WalletError::TokenNotFound { .. } => {
                ErrorKind::ConfigNotFound
            }
            WalletError::InvalidAddress(_)
            | WalletError::InvalidPrivateKey(_)
            | WalletError::InvalidAmount(_)
            | WalletError::InvalidInput(_) => ErrorKind::InvalidInput,
            WalletError::NetworkError(_)
            | WalletError::BlockchainError(_)
            | WalletError::TransactionFailed(_)
            | WalletError::TimeoutError(_) => ErrorKind::NetworkOrChain,
            WalletError::ConfigError(_) => ErrorKind::Config,
            WalletError::SigningFailed(_)
            | WalletError::KeyGenerationFailed(_)
            | WalletError::MnemonicError(_)
            | WalletError::IoError(_)
            | WalletError::SerializationError(_)
            | WalletError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Whether the lookup layer rejected the request before any network call.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::ConfigNotFound
    }
}

impl From<anyhow::Error> for WalletError {
    fn from(err: anyhow::Error) -> Self {
        WalletError::Other(err.to_string())
    }
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        WalletError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_chain_not_found_names_chain() {
        let err = WalletError::ChainNotFound("Ethereum Mainnet".to_string());
        assert_eq!(
            format!("{}", err),
            "Chain 'Ethereum Mainnet' does not exist in the chain registry"
        );
    }

    #[test]
    fn test_display_token_not_found_names_both() {
        let err = WalletError::TokenNotFound { chain: "BSC".into(), coin: "DOGE".into() };
        let msg = err.to_string();
        assert!(msg.contains("DOGE"));
        assert!(msg.contains("BSC"));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(WalletError::ChainNotFound("x".into()).kind(), ErrorKind::ConfigNotFound);
        assert_eq!(WalletError::InvalidAddress("x".into()).kind(), ErrorKind::InvalidInput);
        assert_eq!(WalletError::InvalidPrivateKey("x".into()).kind(), ErrorKind::InvalidInput);
        assert_eq!(WalletError::NetworkError("x".into()).kind(), ErrorKind::NetworkOrChain);
        assert_eq!(WalletError::TransactionFailed("x".into()).kind(), ErrorKind::NetworkOrChain);
        assert_eq!(WalletError::TimeoutError("x".into()).kind(), ErrorKind::NetworkOrChain);
        assert_eq!(WalletError::ConfigError("x".into()).kind(), ErrorKind::Config);
        assert!(WalletError::TokenNotFound { chain: "a".into(), coin: "b".into() }.is_not_found());
    }

    #[test]
    fn test_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("Test error");
        let wallet_err: WalletError = anyhow_err.into();
        match wallet_err {
            WalletError::Other(msg) => assert_eq!(msg, "Test error"),
            _ => panic!("Expected Other variant"),
        }
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let wallet_err: WalletError = err.into();
        assert!(matches!(wallet_err, WalletError::SerializationError(_)));
    }
}
