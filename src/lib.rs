// src/lib.rs

pub mod blockchain;
pub mod cli;
pub mod core;
pub mod logging;
pub mod security;
pub mod service;
pub mod tools;

pub use crate::core::keygen::{generate_evm_address, generate_sol_address, generate_wallet_info};
pub use crate::core::{TransferRequest, TransferResult, TransferState, WalletError};
pub use crate::service::{TransferDispatcher, TransferHandle};
