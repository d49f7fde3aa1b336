//! Razorweb main entry point

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use razorweb_api::start_server;
use razorweb_config::{Config, ConfigError};
use razorweb_core::{GatewayClient, TransactionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "razorweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web viewer for payment-gateway transactions", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    // Logging is configured from the file, so a missing file is reported after init
    let (config, missing) = match Config::load(args.config.clone()) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            let hint = e.hint();
            return Err(e).with_context(|| {
                format!("Failed to load configuration from {} ({})", args.config.display(), hint)
            });
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if missing {
        warn!("Config file {} not found, using defaults", args.config.display());
    } else {
        info!("Config loaded from {}", args.config.display());
    }

    let client = GatewayClient::new(&config.gateway).context("Failed to create transaction client")?;
    info!("Transaction endpoint: {}", client.endpoint());
    let store = Arc::new(TransactionStore::new(config, Arc::new(client)));

    let rt = Runtime::new()?;
    rt.block_on(start_server(store))?;

    Ok(())
}
