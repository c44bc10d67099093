//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts and intervals > 0)
//! - Validate the contract address and RPC URL parse
//!
//! Returns all validation errors, not just the first.

use alloy::primitives::Address;

use crate::config::schema::ClientConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.provider.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "provider.rpc_url",
            message: format!("'{}' is not a valid URL", config.provider.rpc_url),
        });
    }

    if config.provider.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "provider.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.contract.address.parse::<Address>().is_err() {
        errors.push(ValidationError {
            field: "contract.address",
            message: format!("'{}' is not a valid address", config.contract.address),
        });
    }

    if config.dashboard.refresh_interval_secs == 0 {
        errors.push(ValidationError {
            field: "dashboard.refresh_interval_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.storage.path.trim().is_empty() {
        errors.push(ValidationError {
            field: "storage.path",
            message: "must not be empty".to_string(),
        });
    }

    if config.log.filter.trim().is_empty() {
        errors.push(ValidationError {
            field: "log.filter",
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
