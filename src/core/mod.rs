pub mod abi;
pub mod amount;
pub mod config;
pub mod domain;
pub mod errors;
pub mod keygen;
pub mod registry;
pub mod validation;

pub use domain::{TransferRequest, TransferResult, TransferState};
pub use errors::{ErrorKind, WalletError};
pub use registry::{ChainRecord, RegistryStore, TokenRecord};
