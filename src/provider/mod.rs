//! Wallet provider boundary.
//!
//! # Data Flow
//! ```text
//! WalletTransport (injected provider: accounts, chain id, signer, events)
//!     → gateway.rs (wire → typed translation, call-handle binding)
//!     → session manager (lifecycle owner)
//! ```
//!
//! The gateway is stateless per call: no caching, no retry. Resilience is
//! not its job.

pub mod gateway;
pub mod rpc;
pub mod transport;
pub mod types;

pub use gateway::ProviderGateway;
pub use rpc::RpcTransport;
pub use transport::WalletTransport;
pub use types::{chain_name, ChainId, ProviderError, ProviderResult, WalletEvent};
