//! Wallet provider types and error definitions.

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Decode a wire-format chain id (hex string, e.g. `"0x89"`).
    pub fn from_hex(raw: &str) -> Result<Self, ProviderError> {
        let digits = raw
            .trim()
            .strip_prefix("0x")
            .or_else(|| raw.trim().strip_prefix("0X"))
            .unwrap_or_else(|| raw.trim());

        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ProviderError::InvalidChainId(raw.to_string()))
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name for a chain id, as shown in the wallet view.
pub fn chain_name(chain_id: ChainId) -> &'static str {
    match chain_id.0 {
        1 => "Ethereum Mainnet",
        5 => "Goerli Testnet",
        137 => "Polygon Mainnet",
        80001 => "Mumbai Testnet",
        17000 => "ETH Holesky Testnet",
        11155111 => "ETH Sepolia Testnet",
        _ => "Unknown Network",
    }
}

/// Push notification from the wallet side.
#[derive(Debug, Clone)]
pub enum WalletEvent {
    /// The selected accounts changed; payload is the new ordered account list.
    AccountsChanged(Vec<String>),
    /// The active chain changed; payload is the hex-encoded chain id.
    ChainChanged(String),
}

/// Errors surfaced by the provider boundary.
///
/// The gateway translates and surfaces these; it never recovers them.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No wallet provider is injected/configured.
    #[error("no wallet provider is available")]
    Unavailable,

    /// The user declined the account permission prompt.
    #[error("wallet permission request rejected: {0}")]
    UserRejected(String),

    /// The provider granted access but returned an empty account list.
    #[error("wallet provider returned no accounts")]
    NoAccounts,

    /// Signer acquisition or call-handle construction failed.
    #[error("call handle binding failed: {0}")]
    BindFailed(String),

    /// A request to the provider failed.
    #[error("provider request failed: {0}")]
    Rpc(String),

    /// An account string from the wire did not parse as an address.
    #[error("invalid account address '{0}'")]
    InvalidAddress(String),

    /// A chain id from the wire did not parse.
    #[error("invalid chain id '{0}'")]
    InvalidChainId(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
