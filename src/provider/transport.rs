//! Wallet transport boundary.
//!
//! # Responsibilities
//! - Define the wire-level contract of an injected wallet provider
//! - Carry account access requests, chain id reads and signer acquisition
//! - Push wallet-side account/chain change notifications
//!
//! # Design Decisions
//! - Wire values stay untyped here (address strings, hex chain ids); the
//!   gateway owns translation
//! - Notifications are a broadcast channel so every consumer gets its own
//!   receiver

use alloy::providers::DynProvider;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::provider::types::{ProviderResult, WalletEvent};

/// The injected wallet provider, as seen at the wire boundary.
///
/// Implementations translate their native failure modes into
/// [`ProviderError`](crate::provider::ProviderError) kinds verbatim; user
/// rejection of the permission prompt must surface as `UserRejected`.
#[async_trait]
pub trait WalletTransport: Send + Sync {
    /// Request account access. Returns the ordered account address strings
    /// granted by the wallet.
    async fn request_accounts(&self) -> ProviderResult<Vec<String>>;

    /// Read the active chain id, hex-encoded as on the wire (e.g. `"0x1"`).
    async fn chain_id(&self) -> ProviderResult<String>;

    /// Obtain a signing-capable RPC provider for `account`.
    ///
    /// Fails with `BindFailed` if the signer cannot be acquired.
    async fn signing_provider(&self, account: &str) -> ProviderResult<DynProvider>;

    /// Subscribe to wallet-side push notifications.
    fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}
