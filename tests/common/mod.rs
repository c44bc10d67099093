//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{DynProvider, ProviderBuilder};
use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::broadcast;

use pegbreaker_dashboard::provider::{
    ProviderError, ProviderGateway, ProviderResult, WalletEvent, WalletTransport,
};
use pegbreaker_dashboard::session::{FileStore, SessionManager};

#[allow(dead_code)]
pub const ACCOUNT_ONE: &str = "0x1111111111111111111111111111111111111111";
#[allow(dead_code)]
pub const ACCOUNT_TWO: &str = "0x2222222222222222222222222222222222222222";
#[allow(dead_code)]
pub const ACCOUNT_THREE: &str = "0x3333333333333333333333333333333333333333";

/// A provider pointed at a port nothing listens on. Building it never
/// connects; calls through it fail fast.
pub fn unreachable_provider() -> DynProvider {
    use alloy::providers::Provider;
    ProviderBuilder::new()
        .connect_http("http://127.0.0.1:1".parse().unwrap())
        .erased()
}

pub fn contract_address() -> Address {
    pegbreaker_dashboard::contract::PEGBREAKER_ADDRESS
}

/// Scripted wallet transport.
#[allow(dead_code)]
pub struct MockTransport {
    accounts: Vec<String>,
    chain_id_hex: String,
    reject: bool,
    fail_bind: bool,
    connect_delay: Option<Duration>,
    pub request_count: AtomicU32,
    events: broadcast::Sender<WalletEvent>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new(accounts: &[&str], chain_id_hex: &str) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: accounts.iter().map(|s| s.to_string()).collect(),
            chain_id_hex: chain_id_hex.to_string(),
            reject: false,
            fail_bind: false,
            connect_delay: None,
            request_count: AtomicU32::new(0),
            events,
        }
    }

    /// A transport whose permission prompt the user declines.
    pub fn rejecting() -> Self {
        let mut transport = Self::new(&[], "0x1");
        transport.reject = true;
        transport
    }

    pub fn with_bind_failure(mut self) -> Self {
        self.fail_bind = true;
        self
    }

    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    /// Push a wallet-side notification to subscribers.
    pub fn emit(&self, event: WalletEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl WalletTransport for MockTransport {
    async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject {
            return Err(ProviderError::UserRejected(
                "User rejected the request.".to_string(),
            ));
        }
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> ProviderResult<String> {
        Ok(self.chain_id_hex.clone())
    }

    async fn signing_provider(&self, _account: &str) -> ProviderResult<DynProvider> {
        if self.fail_bind {
            return Err(ProviderError::BindFailed("signer unavailable".to_string()));
        }
        Ok(unreachable_provider())
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}

/// A manager wired to the given transport and a temp-dir file store.
///
/// The `TempDir` must be kept alive for the duration of the test.
#[allow(dead_code)]
pub fn manager_with(
    transport: Option<Arc<dyn WalletTransport>>,
) -> (TempDir, Arc<FileStore>, SessionManager) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("session.json")));
    let gateway = ProviderGateway::new(transport);
    let manager = SessionManager::new(gateway, store.clone(), contract_address());
    (dir, store, manager)
}
