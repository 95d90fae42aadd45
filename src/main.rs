// src/main.rs
//! wallet-tool: key generation and single-shot transfers from the command line.
use std::io::{self, BufRead, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use zeroize::Zeroize;

use my_wallet_tool::cli::{Cli, Commands, GenKind, RegistryAction};
use my_wallet_tool::core::config::AppConfig;
use my_wallet_tool::core::domain::TransferRequest;
use my_wallet_tool::core::keygen::{generate_evm_keypair, generate_solana_keypair, generate_wallet_info, GeneratedKey};
use my_wallet_tool::core::registry::{RegistryDocument, RegistryStore};
use my_wallet_tool::core::validation::validate_address;
use my_wallet_tool::logging::init_logging;
use my_wallet_tool::service::TransferDispatcher;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = AppConfig::resolve_path(cli.config.as_deref());
    let config = AppConfig::load(&config_path)?;
    let _guard = init_logging(&config.logging)?;
    info!(config = %config_path.display(), "wallet-tool v{}", env!("CARGO_PKG_VERSION"));

    let store = RegistryStore::new(&config.registry.chain_file, &config.registry.token_file);

    match cli.command {
        Commands::Gen { kind, reveal_secret } => {
            match kind {
                GenKind::Evm => print_key(generate_evm_keypair(), reveal_secret)?,
                GenKind::Sol => print_key(generate_solana_keypair(), reveal_secret)?,
                GenKind::Wallet => print_json(&generate_wallet_info()?)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Transfer { chain, coin, to, amount, key_env } => {
            let private_key = read_private_key(&key_env)?;
            let dispatcher = TransferDispatcher::from_config(&config);
            let handle = dispatcher.submit(TransferRequest::new(private_key, to, chain, coin, amount));

            let mut states = handle.subscribe();
            let id = handle.id();
            tokio::spawn(async move {
                while states.changed().await.is_ok() {
                    let state = *states.borrow_and_update();
                    info!(request_id = %id, %state, "transfer state");
                    if state.is_terminal() {
                        break;
                    }
                }
            });

            let result = handle.wait().await;
            println!("{}", result.to_json_pretty());
            Ok(if result.success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Chains => {
            print_json(&store.list_chains()?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tokens { chain } => {
            print_json(&store.list_tokens(chain.as_deref())?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Registry { action } => {
            match action {
                RegistryAction::Show { document } => println!("{}", store.show(document.into())?),
                RegistryAction::Import { document, file } => {
                    let contents = match &file {
                        Some(path) => std::fs::read_to_string(path)
                            .with_context(|| format!("failed to read {}", path.display()))?,
                        None => {
                            let mut buf = String::new();
                            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
                            buf
                        }
                    };
                    let document: RegistryDocument = document.into();
                    store.import(document, &contents)?;
                    let target = match document {
                        RegistryDocument::Chains => store.chain_file(),
                        RegistryDocument::Tokens => store.token_file(),
                    };
                    print_json(&json!({ "imported": target.display().to_string() }))?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { chain, address } => {
            let valid = validate_address(&address, &chain);
            print_json(&json!({ "chain": chain, "address": address, "valid": valid }))?;
            Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_key(key: GeneratedKey, reveal_secret: bool) -> Result<()> {
    if reveal_secret {
        warn!("printing a secret key to stdout");
        print_json(&json!({ "address": key.address, "secret": key.secret() }))
    } else {
        print_json(&json!({ "address": key.address }))
    }
}

/// Key from `$var`, else the first line of stdin.
fn read_private_key(var: &str) -> Result<String> {
    if let Ok(key) = std::env::var(var) {
        return Ok(key);
    }
    info!(var, "key variable unset, reading private key from stdin");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("failed to read private key from stdin")?;
    let key = line.trim().to_string();
    line.zeroize();
    if key.is_empty() {
        anyhow::bail!("no private key: set {} or pass it on stdin", var);
    }
    Ok(key)
}
