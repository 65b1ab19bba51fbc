mod chain;
mod cli_messages;
mod config;
mod consts;
mod error;
mod error_classifier;
mod events;
mod keys;
mod listing;
mod loader;
mod logging;
mod metadata;
mod network;
mod session;
mod ui;
mod units;

use crate::config::{Config, ConfigOverrides, get_config_path};
use crate::logging::get_rust_log_level;
use crate::network::Network;
use crate::session::{OutputFormat, run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Terminal dashboard of the NFTs you created and sold
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and display your created and sold listings
    Start {
        /// Print the result to the console instead of opening the dashboard
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// With --headless, print the listings as JSON
        #[arg(long, default_value_t = false, requires = "headless")]
        json: bool,

        /// Paint the dashboard background
        #[arg(long, default_value_t = false)]
        with_background: bool,

        /// JSON-RPC endpoint of the wallet-backed provider
        #[arg(long, value_name = "URL")]
        rpc_url: Option<String>,

        /// Marketplace contract address
        #[arg(long, value_name = "ADDRESS")]
        marketplace: Option<String>,

        /// NFT contract address
        #[arg(long, value_name = "ADDRESS")]
        token: Option<String>,

        /// Account to query as, instead of asking the provider
        #[arg(long, value_name = "ADDRESS")]
        account: Option<String>,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the stored configuration
    Show,
    /// Write the configuration file
    Set {
        /// JSON-RPC endpoint of the wallet-backed provider
        #[arg(long, value_name = "URL")]
        rpc_url: String,

        /// Marketplace contract address
        #[arg(long, value_name = "ADDRESS")]
        marketplace: String,

        /// NFT contract address
        #[arg(long, value_name = "ADDRESS")]
        token: String,

        /// Account to query as
        #[arg(long, value_name = "ADDRESS")]
        account: Option<String>,

        /// Chain id the provider must report
        #[arg(long)]
        chain_id: Option<u64>,

        /// Gateway used to fetch ipfs:// metadata
        #[arg(long, value_name = "URL")]
        ipfs_gateway: Option<String>,
    },
    /// Delete the configuration file
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log::set_max_level(get_rust_log_level().into());

    let network_str = std::env::var("DASHBOARD_NETWORK").unwrap_or_default();
    let network = network_str.parse::<Network>().unwrap_or_else(|_| {
        if !network_str.is_empty() {
            crate::print_cmd_warn!(
                "Unknown network",
                "DASHBOARD_NETWORK={} is not one of local, sepolia; using {}",
                network_str,
                Network::default()
            );
        }
        Network::default()
    });

    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            headless,
            json,
            with_background,
            rpc_url,
            marketplace,
            token,
            account,
        } => {
            let overrides = ConfigOverrides {
                rpc_url,
                marketplace_address: marketplace,
                token_address: token,
                account,
                ..Default::default()
            };
            let config = resolve_config(&config_path, network, overrides)?;
            let session = setup_session(&config)?;
            if headless {
                let format = if json {
                    OutputFormat::Json
                } else {
                    OutputFormat::Text
                };
                run_headless_mode(session, format).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Config { action } => run_config_command(&config_path, action),
    }
}

/// Config file values, or network defaults when there is no file, with CLI
/// flags applied on top.
fn resolve_config(
    config_path: &Path,
    network: Network,
    overrides: ConfigOverrides,
) -> Result<Config, Box<dyn Error>> {
    let base = if config_path.exists() {
        Config::load_from_file(config_path)?
    } else {
        Config::for_network(network)
    };
    Ok(base.with_overrides(overrides))
}

fn run_config_command(config_path: &Path, action: ConfigCommand) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigCommand::Show => {
            if !config_path.exists() {
                crate::print_cmd_info!(
                    "No configuration file",
                    "Run `config set` to create {}",
                    config_path.display()
                );
                return Ok(());
            }
            let config = Config::load_from_file(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommand::Set {
            rpc_url,
            marketplace,
            token,
            account,
            chain_id,
            ipfs_gateway,
        } => {
            let config = Config::new(rpc_url, marketplace, token).with_overrides(ConfigOverrides {
                account,
                chain_id,
                ipfs_gateway,
                ..Default::default()
            });
            if let Err(e) = config.validate() {
                crate::print_cmd_error!("Invalid configuration", e.to_string().as_str());
                return Err(e.into());
            }
            config.save(config_path)?;
            crate::print_cmd_success!("Configuration saved", "{}", config_path.display());
            Ok(())
        }
        ConfigCommand::Clear => {
            println!("Clearing configuration file...");
            Config::clear(config_path).map_err(Into::into)
        }
    }
}
