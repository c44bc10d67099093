//! Pegbreaker contract bindings.

use alloy::primitives::{address, Address};
use alloy::sol;

/// Deployed Pegbreaker contract address, supplied by deployment tooling.
pub const PEGBREAKER_ADDRESS: Address = address!("0xf0641d4B9a733908EA8Fe1e4d262e2dFf65FA194");

sol! {
    /// Pegbreaker protocol surface used by the dashboard.
    ///
    /// DPG is the protocol token, DAI the collateral, DPB the bond token.
    #[sol(rpc)]
    contract Pegbreaker {
        function getTokenBalances(address account) external view returns (uint256 dpg, uint256 dai, uint256 dpb);
        function getDAIPrice() external view returns (uint256 price);
        function getDPGMarketCap() external view returns (uint256 cap);
        function getDAIMarketCap() external view returns (uint256 cap);
        function getDPBMarketCap() external view returns (uint256 cap);
        function isEpochComplete() external view returns (bool complete);

        function stakeDPG(uint256 amount) external;
        function mintDPGWithDAI(uint256 amount) external;
        function burnDPG(uint256 amount) external;
        function issueBond(uint8 bondType) external;
    }
}
