//! Protocol actions submitted from the dashboard.
//!
//! Each action validates its input, submits one state-changing call through
//! the session's call handle and awaits confirmation before reporting
//! success.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use alloy::rpc::types::TransactionReceipt;
use thiserror::Error;

use crate::contract::{BondTerm, CallError, CallHandle};

/// Errors from dashboard actions.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The amount string is empty, unparsable or not strictly positive.
    #[error("invalid amount '{0}': enter a decimal amount greater than zero")]
    InvalidAmount(String),

    /// The underlying contract call failed or was reverted.
    #[error(transparent)]
    Call(#[from] CallError),
}

/// Parse a user-entered decimal token amount into wei.
///
/// Rejects empty, unparsable, zero and negative input.
pub fn parse_amount(input: &str) -> Result<U256, ActionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ActionError::InvalidAmount(input.to_string()));
    }
    let wei =
        parse_ether(trimmed).map_err(|_| ActionError::InvalidAmount(input.to_string()))?;
    if wei.is_zero() {
        return Err(ActionError::InvalidAmount(input.to_string()));
    }
    Ok(wei)
}

/// Stake DPG tokens.
pub async fn stake(handle: &CallHandle, amount: &str) -> Result<TransactionReceipt, ActionError> {
    let wei = parse_amount(amount)?;
    let receipt = handle.stake_dpg(wei).await?;
    tracing::info!(tx = %receipt.transaction_hash, amount, "Stake confirmed");
    Ok(receipt)
}

/// Mint DPG against DAI collateral.
pub async fn mint_with_dai(
    handle: &CallHandle,
    amount: &str,
) -> Result<TransactionReceipt, ActionError> {
    let wei = parse_amount(amount)?;
    let receipt = handle.mint_dpg_with_dai(wei).await?;
    tracing::info!(tx = %receipt.transaction_hash, amount, "Mint with DAI confirmed");
    Ok(receipt)
}

/// Burn DPG tokens.
pub async fn burn(handle: &CallHandle, amount: &str) -> Result<TransactionReceipt, ActionError> {
    let wei = parse_amount(amount)?;
    let receipt = handle.burn_dpg(wei).await?;
    tracing::info!(tx = %receipt.transaction_hash, amount, "Burn confirmed");
    Ok(receipt)
}

/// Issue a DPB bond of the given term.
pub async fn issue_bond(
    handle: &CallHandle,
    term: BondTerm,
) -> Result<TransactionReceipt, ActionError> {
    let receipt = handle.issue_bond(term).await?;
    tracing::info!(tx = %receipt.transaction_hash, term = %term, "Bond issued");
    Ok(receipt)
}
