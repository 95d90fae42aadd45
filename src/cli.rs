use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::registry::RegistryDocument;

/// Key generation and single-shot EVM / Solana transfers
#[derive(Debug, Parser)]
#[command(name = "wallet-tool", version, about, disable_help_subcommand = true)]
pub struct Cli {
    /// Path to the TOML config (falls back to CONFIG_PATH, then config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate an address, keypair or mnemonic
    Gen {
        #[arg(value_enum)]
        kind: GenKind,
        /// Also print the secret key (never logged)
        #[arg(long)]
        reveal_secret: bool,
    },
    /// Send one transfer and print the result as JSON
    Transfer {
        #[arg(long)]
        chain: String,
        #[arg(long)]
        coin: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        /// Environment variable holding the private key; stdin is read when unset
        #[arg(long, default_value = "WALLET_PRIVATE_KEY")]
        key_env: String,
    },
    /// List configured chains
    Chains,
    /// List configured tokens
    Tokens {
        #[arg(long)]
        chain: Option<String>,
    },
    /// Show or replace a registry document
    Registry {
        #[command(subcommand)]
        action: RegistryAction,
    },
    /// Check an address shape for a chain
    Validate {
        #[arg(long)]
        chain: String,
        address: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenKind {
    Evm,
    Sol,
    Wallet,
}

#[derive(Debug, Subcommand)]
pub enum RegistryAction {
    Show {
        #[arg(value_enum)]
        document: DocumentArg,
    },
    /// Validate FILE (or stdin) and overwrite the document with it
    Import {
        #[arg(value_enum)]
        document: DocumentArg,
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentArg {
    Chains,
    Tokens,
}

impl From<DocumentArg> for RegistryDocument {
    fn from(arg: DocumentArg) -> Self {
        match arg {
            DocumentArg::Chains => RegistryDocument::Chains,
            DocumentArg::Tokens => RegistryDocument::Tokens,
        }
    }
}
