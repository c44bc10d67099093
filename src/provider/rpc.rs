//! RPC-backed wallet transport.
//!
//! # Responsibilities
//! - Back the wallet boundary with a JSON-RPC endpoint and a local signer
//! - Load the signing key from the environment
//! - Apply a timeout to every RPC read
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data

use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::timeout;

use crate::provider::transport::WalletTransport;
use crate::provider::types::{ProviderError, ProviderResult, WalletEvent};

/// Environment variable name for the signing key.
pub const WALLET_KEY_ENV_VAR: &str = "PEGBREAKER_WALLET_PRIVATE_KEY";

/// Wallet transport backed by an HTTP JSON-RPC endpoint and a locally held
/// signer. There is no permission prompt in this flavor: the signer's
/// address is the one granted account.
pub struct RpcTransport {
    rpc_url: url::Url,
    signer: PrivateKeySigner,
    timeout_duration: Duration,
    events: broadcast::Sender<WalletEvent>,
}

impl RpcTransport {
    /// Create a transport from a hex-encoded private key string.
    ///
    /// The key is parsed and held in memory only; it is never logged.
    pub fn from_private_key(
        rpc_url: &str,
        private_key_hex: &str,
        timeout_secs: u64,
    ) -> ProviderResult<Self> {
        let rpc_url: url::Url = rpc_url
            .parse()
            .map_err(|e| ProviderError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        // Strip 0x prefix if present
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ProviderError::BindFailed(format!("Invalid private key format: {}", e)))?;

        let (events, _) = broadcast::channel(16);

        tracing::info!(
            address = %signer.address(),
            rpc_url = %rpc_url,
            "RPC wallet transport initialized"
        );

        Ok(Self {
            rpc_url,
            signer,
            timeout_duration: Duration::from_secs(timeout_secs),
            events,
        })
    }

    /// Load the transport from the environment.
    ///
    /// Returns `Ok(None)` when `PEGBREAKER_WALLET_PRIVATE_KEY` is unset,
    /// which consumers treat as "no wallet provider available".
    pub fn from_env(rpc_url: &str, timeout_secs: u64) -> ProviderResult<Option<Self>> {
        match std::env::var(WALLET_KEY_ENV_VAR) {
            Ok(key) => Self::from_private_key(rpc_url, &key, timeout_secs).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn read_provider(&self) -> DynProvider {
        ProviderBuilder::new()
            .connect_http(self.rpc_url.clone())
            .erased()
    }
}

#[async_trait]
impl WalletTransport for RpcTransport {
    async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        Ok(vec![self.signer.address().to_string()])
    }

    async fn chain_id(&self) -> ProviderResult<String> {
        let fut = self.read_provider().get_chain_id();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(id)) => Ok(format!("0x{:x}", id)),
            Ok(Err(e)) => Err(ProviderError::Rpc(e.to_string())),
            Err(_) => Err(ProviderError::Rpc(format!(
                "chain id read timed out after {}s",
                self.timeout_duration.as_secs()
            ))),
        }
    }

    async fn signing_provider(&self, account: &str) -> ProviderResult<DynProvider> {
        let granted = self.signer.address().to_string();
        if !account.eq_ignore_ascii_case(&granted) {
            return Err(ProviderError::BindFailed(format!(
                "no signer for account {}",
                account
            )));
        }

        let wallet = EthereumWallet::from(self.signer.clone());
        Ok(ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.clone())
            .erased())
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}

impl std::fmt::Debug for RpcTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcTransport")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("address", &self.signer.address())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn test_request_accounts_returns_signer_address() {
        let transport =
            RpcTransport::from_private_key("http://localhost:8545", TEST_PRIVATE_KEY, 5).unwrap();
        let accounts = transport.request_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(
            accounts[0].to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_key_with_0x_prefix() {
        let transport = RpcTransport::from_private_key(
            "http://localhost:8545",
            &format!("0x{}", TEST_PRIVATE_KEY),
            5,
        );
        assert!(transport.is_ok());
    }

    #[test]
    fn test_invalid_private_key() {
        let result =
            RpcTransport::from_private_key("http://localhost:8545", "invalid_key", 5);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid private key"));
    }

    #[test]
    fn test_invalid_rpc_url() {
        let result = RpcTransport::from_private_key("not a url", TEST_PRIVATE_KEY, 5);
        assert!(matches!(result, Err(ProviderError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_signing_provider_rejects_unknown_account() {
        let transport =
            RpcTransport::from_private_key("http://localhost:8545", TEST_PRIVATE_KEY, 5).unwrap();
        let result = transport
            .signing_provider("0x1111111111111111111111111111111111111111")
            .await;
        assert!(matches!(result, Err(ProviderError::BindFailed(_))));
    }
}
