//! vaultstore CLI: one command per invocation, JSON on stdout

use anyhow::{Context, bail};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vaultstore::{Command, ErrorResponse, StoreConfig, VaultStore, execute};
use vaultstore_core::expand_path;

/// Query and edit a markdown vault
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the vault directory (overrides the config file)
    #[arg(short, long, env = "VAULT_PATH")]
    vault: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `vaultstore_vault=trace`
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(&args)?;

    // Logs go to stderr so stdout stays pure JSON
    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!(
        vault = %config.vault_path.display(),
        "vaultstore v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = VaultStore::open(config).context("Failed to open vault")?;

    match execute(&store, args.command).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::error!("vault.command_failed: {}", e);
            println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(&e))?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<StoreConfig> {
    let mut config = match &args.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => StoreConfig::default(),
    };

    if let Some(vault) = &args.vault {
        config.vault_path = expand_path(vault)?;
    } else if args.config.is_none() {
        bail!("No vault given: pass --vault, set VAULT_PATH, or use --config");
    }

    config.validate().context("Invalid vault configuration")?;
    Ok(config)
}
