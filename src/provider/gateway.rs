//! Provider gateway.
//!
//! # Responsibilities
//! - Wrap the injected wallet transport, including its absence
//! - Translate wire values (address strings, hex chain ids) to typed ones
//! - Bind call handles for a signer
//!
//! Pure boundary translator: no caching, no retries, every operation is a
//! single-shot request to the transport.

use std::sync::Arc;

use alloy::primitives::Address;
use tokio::sync::broadcast;

use crate::contract::CallHandle;
use crate::provider::transport::WalletTransport;
use crate::provider::types::{ChainId, ProviderError, ProviderResult, WalletEvent};

/// Gateway over an optionally present wallet transport.
///
/// Every operation fails with [`ProviderError::Unavailable`] when no
/// transport is injected.
#[derive(Clone)]
pub struct ProviderGateway {
    transport: Option<Arc<dyn WalletTransport>>,
}

impl ProviderGateway {
    /// Create a gateway; `None` models the missing injected provider.
    pub fn new(transport: Option<Arc<dyn WalletTransport>>) -> Self {
        Self { transport }
    }

    /// Whether a wallet transport is present at all.
    pub fn detected(&self) -> bool {
        self.transport.is_some()
    }

    fn transport(&self) -> ProviderResult<&Arc<dyn WalletTransport>> {
        self.transport.as_ref().ok_or(ProviderError::Unavailable)
    }

    /// Request account access and return the granted addresses, in wallet
    /// order.
    pub async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        let raw = self.transport()?.request_accounts().await?;
        raw.iter()
            .map(|s| {
                s.parse::<Address>()
                    .map_err(|_| ProviderError::InvalidAddress(s.clone()))
            })
            .collect()
    }

    /// Read the active chain id, decoded from its wire hex form.
    pub async fn current_chain_id(&self) -> ProviderResult<ChainId> {
        let raw = self.transport()?.chain_id().await?;
        ChainId::from_hex(&raw)
    }

    /// Bind a call handle for `account` against the deployed contract.
    pub async fn bind_call_handle(
        &self,
        account: Address,
        chain_id: ChainId,
        contract_address: Address,
    ) -> ProviderResult<CallHandle> {
        let provider = self
            .transport()?
            .signing_provider(&account.to_string())
            .await?;
        Ok(CallHandle::bind(account, chain_id, contract_address, provider))
    }

    /// Subscribe to wallet push notifications, if a transport is present.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<WalletEvent>> {
        self.transport.as_ref().map(|t| t.subscribe())
    }
}

impl std::fmt::Debug for ProviderGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderGateway")
            .field("detected", &self.detected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_transport_is_unavailable() {
        let gateway = ProviderGateway::new(None);
        assert!(!gateway.detected());
        assert!(matches!(
            gateway.request_accounts().await,
            Err(ProviderError::Unavailable)
        ));
        assert!(matches!(
            gateway.current_chain_id().await,
            Err(ProviderError::Unavailable)
        ));
        assert!(gateway.subscribe().is_none());
    }
}
