use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pegbreaker_dashboard::config::{load_config, ClientConfig};
use pegbreaker_dashboard::contract::BondTerm;
use pegbreaker_dashboard::dashboard::{actions, poller, DashboardSnapshot};
use pegbreaker_dashboard::provider::{chain_name, ProviderGateway, RpcTransport, WalletTransport};
use pegbreaker_dashboard::session::{FileStore, SessionManager};

#[derive(Parser)]
#[command(name = "peg-cli")]
#[command(about = "Management CLI for the Pegbreaker dashboard client", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "pegbreaker.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect and show the session plus a one-shot dashboard snapshot
    Status,
    /// Stake DPG tokens
    Stake {
        /// Decimal token amount, e.g. "1.5"
        amount: String,
    },
    /// Mint DPG against DAI collateral
    Mint {
        /// Decimal token amount, e.g. "1.5"
        amount: String,
    },
    /// Burn DPG tokens
    Burn {
        /// Decimal token amount, e.g. "1.5"
        amount: String,
    },
    /// Issue a DPB bond
    Bond {
        /// Bond type: 1 (1-year, 25%) or 2 (2-year, 60%)
        term: u8,
    },
    /// Clear the session and the persisted wallet state
    Disconnect,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if Path::new(&cli.config).exists() {
        load_config(Path::new(&cli.config))?
    } else {
        ClientConfig::default()
    };

    // RUST_LOG overrides the configured filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let contract_address = config.contract.address.parse()?;
    let transport = RpcTransport::from_env(
        &config.provider.rpc_url,
        config.provider.request_timeout_secs,
    )?
    .map(|t| Arc::new(t) as Arc<dyn WalletTransport>);

    let gateway = ProviderGateway::new(transport);
    let store = Arc::new(FileStore::new(&config.storage.path));
    let manager = SessionManager::new(gateway, store, contract_address);

    if let Commands::Disconnect = cli.command {
        manager.disconnect()?;
        println!("Session cleared.");
        return Ok(());
    }

    let session = manager.connect().await?;
    let handle = session
        .call_handle
        .as_ref()
        .ok_or("wallet connect settled without a call handle")?;

    match cli.command {
        Commands::Status => {
            let snapshot = poller::refresh(handle, &DashboardSnapshot::default()).await;
            let chain_id = handle.chain_id();
            let status = json!({
                "account": handle.account().to_string(),
                "chain_id": chain_id.0,
                "network": chain_name(chain_id),
                "contract": handle.contract_address().to_string(),
                "dashboard": snapshot,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Stake { amount } => {
            let receipt = actions::stake(handle, &amount).await?;
            println!("Stake successful! tx: {}", receipt.transaction_hash);
        }
        Commands::Mint { amount } => {
            let receipt = actions::mint_with_dai(handle, &amount).await?;
            println!("Mint with DAI successful! tx: {}", receipt.transaction_hash);
        }
        Commands::Burn { amount } => {
            let receipt = actions::burn(handle, &amount).await?;
            println!("Burn DPG successful! tx: {}", receipt.transaction_hash);
        }
        Commands::Bond { term } => {
            let term = BondTerm::try_from(term)?;
            let receipt = actions::issue_bond(handle, term).await?;
            println!("Bond issued successfully! tx: {}", receipt.transaction_hash);
        }
        Commands::Disconnect => unreachable!("handled above"),
    }

    Ok(())
}
