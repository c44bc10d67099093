//! Pegbreaker Dashboard Client
//!
//! A headless client for the Pegbreaker token-economics protocol.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │               DASHBOARD CLIENT                    │
//!                  │                                                   │
//!   Wallet RPC     │  ┌───────────┐    ┌───────────┐    ┌──────────┐  │
//!   ───────────────┼─▶│ transport │───▶│  gateway  │───▶│ session  │  │
//!                  │  │ (signer)  │    │ (typed)   │    │ manager  │  │
//!                  │  └───────────┘    └───────────┘    └────┬─────┘  │
//!                  │        │ push events                    │watch   │
//!                  │        └──────────────────────────▶─────┤        │
//!                  │                                         ▼        │
//!                  │  ┌───────────┐    ┌───────────┐    ┌──────────┐  │
//!   Contract reads │  │ snapshot  │◀───│  poller   │◀───│ session  │  │
//!   ◀──────────────┼──│ (arc-swap)│    │ (interval)│    │ store    │  │
//!                  │  └───────────┘    └───────────┘    └──────────┘  │
//!                  └──────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pegbreaker_dashboard::config::{load_config, ClientConfig};
use pegbreaker_dashboard::dashboard::DashboardPoller;
use pegbreaker_dashboard::lifecycle::Shutdown;
use pegbreaker_dashboard::provider::{ProviderGateway, RpcTransport, WalletTransport};
use pegbreaker_dashboard::session::{FileStore, SessionManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first; the log filter lives in it
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "pegbreaker.toml".to_string());
    let config_found = Path::new(&config_path).exists();
    let config = if config_found {
        load_config(Path::new(&config_path))?
    } else {
        ClientConfig::default()
    };

    // Initialize tracing subscriber; RUST_LOG overrides the configured filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("pegbreaker-dashboard v0.1.0 starting");
    if !config_found {
        tracing::info!(path = %config_path, "No config file found, using defaults");
    }

    tracing::info!(
        rpc_url = %config.provider.rpc_url,
        contract = %config.contract.address,
        refresh_interval_secs = config.dashboard.refresh_interval_secs,
        "Configuration loaded"
    );

    let contract_address = config.contract.address.parse()?;

    // Wallet transport from the environment; absence is non-fatal
    let transport = RpcTransport::from_env(
        &config.provider.rpc_url,
        config.provider.request_timeout_secs,
    )?
    .map(|t| Arc::new(t) as Arc<dyn WalletTransport>);
    if transport.is_none() {
        tracing::warn!("No wallet key in the environment, running without a wallet provider");
    }

    let gateway = ProviderGateway::new(transport);
    let store = Arc::new(FileStore::new(&config.storage.path));
    let manager = Arc::new(SessionManager::new(gateway, store, contract_address));

    let shutdown = Shutdown::new();

    // Connect eagerly; failures are user-visible, not fatal
    match manager.connect().await {
        Ok(session) => tracing::info!(
            account = ?session.account,
            chain_id = ?session.chain_id,
            "Session established"
        ),
        Err(e) => tracing::error!(error = %e, "Wallet connection failed"),
    }

    // Dashboard poller
    let poller = DashboardPoller::new(
        manager.subscribe(),
        Duration::from_secs(config.dashboard.refresh_interval_secs),
    );
    let poller_task = tokio::spawn(poller.run(shutdown.subscribe()));

    // Session event loop
    let event_manager = manager.clone();
    let event_shutdown = shutdown.subscribe();
    let event_task = tokio::spawn(async move {
        event_manager.run(event_shutdown).await;
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    shutdown.trigger();

    let _ = poller_task.await;
    let _ = event_task.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
