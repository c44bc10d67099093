//! Contract-surface types and error definitions.

use alloy::primitives::U256;
use thiserror::Error;

/// Decimal places of the DAI price feed.
pub const DAI_PRICE_DECIMALS: u8 = 8;

/// Per-token balances for one account, in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenBalances {
    pub dpg: U256,
    pub dai: U256,
    pub dpb: U256,
}

/// Per-token market capitalizations, 18-decimal fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketCaps {
    pub dpg: U256,
    pub dai: U256,
    pub dpb: U256,
}

/// Bond maturity offered by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondTerm {
    /// 1-year bond (25% return).
    OneYear,
    /// 2-year bond (60% return).
    TwoYears,
}

impl BondTerm {
    /// On-chain encoding of the bond type.
    pub fn bond_type(self) -> u8 {
        match self {
            BondTerm::OneYear => 1,
            BondTerm::TwoYears => 2,
        }
    }
}

impl TryFrom<u8> for BondTerm {
    type Error = CallError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BondTerm::OneYear),
            2 => Ok(BondTerm::TwoYears),
            other => Err(CallError::Call(format!("unknown bond type {}", other))),
        }
    }
}

impl std::fmt::Display for BondTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BondTerm::OneYear => write!(f, "1-Year Bond (25% return)"),
            BondTerm::TwoYears => write!(f, "2-Year Bond (60% return)"),
        }
    }
}

/// Errors from read or state-changing contract calls.
#[derive(Debug, Error)]
pub enum CallError {
    /// The call itself failed (RPC, encoding, signing, broadcast).
    #[error("contract call failed: {0}")]
    Call(String),

    /// The transaction was mined but reverted.
    #[error("transaction reverted: {0}")]
    Reverted(String),
}

/// Result type for contract operations.
pub type CallResult<T> = Result<T, CallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bond_term_encoding() {
        assert_eq!(BondTerm::OneYear.bond_type(), 1);
        assert_eq!(BondTerm::TwoYears.bond_type(), 2);
    }

    #[test]
    fn test_bond_term_round_trip() {
        assert_eq!(BondTerm::try_from(1).unwrap(), BondTerm::OneYear);
        assert_eq!(BondTerm::try_from(2).unwrap(), BondTerm::TwoYears);
        assert!(BondTerm::try_from(3).is_err());
    }

    #[test]
    fn test_bond_term_display() {
        assert!(BondTerm::OneYear.to_string().contains("25%"));
        assert!(BondTerm::TwoYears.to_string().contains("60%"));
    }
}
