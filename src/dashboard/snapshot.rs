//! Dashboard state snapshot.

use alloy::primitives::utils::{format_ether, format_units};
use alloy::primitives::U256;
use serde::Serialize;

use crate::contract::{MarketCaps, TokenBalances, DAI_PRICE_DECIMALS};

/// Formatted token balances, in whole-token units.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BalanceView {
    pub dpg: String,
    pub dai: String,
    pub dpb: String,
}

impl From<TokenBalances> for BalanceView {
    fn from(balances: TokenBalances) -> Self {
        Self {
            dpg: format_ether(balances.dpg),
            dai: format_ether(balances.dai),
            dpb: format_ether(balances.dpb),
        }
    }
}

/// Formatted market caps, in whole-token units.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MarketCapView {
    pub dpg: String,
    pub dai: String,
    pub dpb: String,
}

impl From<MarketCaps> for MarketCapView {
    fn from(caps: MarketCaps) -> Self {
        Self {
            dpg: format_ether(caps.dpg),
            dai: format_ether(caps.dai),
            dpb: format_ether(caps.dpb),
        }
    }
}

/// One refresh of the on-chain state the dashboard shows.
///
/// Sections are independent: a failed getter degrades its section and is
/// recorded in `errors`, the rest keep their last-good values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub balances: Option<BalanceView>,
    pub market_caps: Option<MarketCapView>,
    pub dai_price: Option<String>,
    pub epoch_complete: Option<bool>,
    pub native_balance: Option<String>,
    pub errors: Vec<String>,
}

/// Format the 8-decimal DAI price feed value for display.
pub fn format_price(price: U256) -> String {
    format_units(price, DAI_PRICE_DECIMALS).unwrap_or_else(|_| price.to_string())
}

/// Format a native balance to four decimal places, as the wallet view does.
pub fn format_native(balance: U256) -> String {
    let eth = format_ether(balance);
    match eth.parse::<f64>() {
        Ok(value) => format!("{:.4}", value),
        Err(_) => eth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    #[test]
    fn test_balance_view_formats_ether() {
        let balances = TokenBalances {
            dpg: parse_ether("1.5").unwrap(),
            dai: parse_ether("2").unwrap(),
            dpb: U256::ZERO,
        };
        let view = BalanceView::from(balances);
        assert_eq!(view.dpg, "1.500000000000000000");
        assert_eq!(view.dai, "2.000000000000000000");
        assert_eq!(view.dpb, "0.000000000000000000");
    }

    #[test]
    fn test_format_price_eight_decimals() {
        assert_eq!(format_price(U256::from(100_000_000u64)), "1.00000000");
        assert_eq!(format_price(U256::from(99_875_000u64)), "0.99875000");
    }

    #[test]
    fn test_format_native_four_decimals() {
        assert_eq!(format_native(parse_ether("1.23456789").unwrap()), "1.2346");
        assert_eq!(format_native(U256::ZERO), "0.0000");
    }
}
