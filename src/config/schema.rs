//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal config works.

use serde::{Deserialize, Serialize};

use crate::contract::PEGBREAKER_ADDRESS;

/// Root configuration for the dashboard client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Wallet provider settings (RPC endpoint, timeouts).
    pub provider: ProviderConfig,

    /// Deployed contract settings.
    pub contract: ContractConfig,

    /// Dashboard polling settings.
    pub dashboard: DashboardConfig,

    /// Durable session storage settings.
    pub storage: StorageConfig,

    /// Logging settings.
    pub log: LogConfig,
}

/// Wallet provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Deployed contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Pegbreaker contract address. Supplied by deployment tooling.
    pub address: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: PEGBREAKER_ADDRESS.to_string(),
        }
    }
}

/// Dashboard polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Refresh interval for the on-chain getters, in seconds.
    pub refresh_interval_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 10,
        }
    }
}

/// Durable session storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the session key-value file.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: ".pegbreaker/session.json".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Tracing filter directive, overridden by `RUST_LOG` when set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "pegbreaker_dashboard=info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.provider.rpc_url, "http://localhost:8545");
        assert_eq!(config.provider.request_timeout_secs, 10);
        assert_eq!(config.dashboard.refresh_interval_secs, 10);
        assert_eq!(config.contract.address, PEGBREAKER_ADDRESS.to_string());
        assert_eq!(config.log.filter, "pegbreaker_dashboard=info");
    }

    #[test]
    fn test_minimal_toml() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.dashboard.refresh_interval_secs, 10);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: ClientConfig = toml::from_str(
            r#"
            [dashboard]
            refresh_interval_secs = 30

            [provider]
            rpc_url = "https://polygon-rpc.com"

            [log]
            filter = "pegbreaker_dashboard=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.dashboard.refresh_interval_secs, 30);
        assert_eq!(config.provider.rpc_url, "https://polygon-rpc.com");
        assert_eq!(config.provider.request_timeout_secs, 10);
        assert_eq!(config.log.filter, "pegbreaker_dashboard=debug");
    }
}
