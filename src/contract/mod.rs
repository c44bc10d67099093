//! Pegbreaker contract surface.
//!
//! # Data Flow
//! ```text
//! abi.rs (sol! bindings, deployed address)
//!     → handle.rs (per-signer bound instance, reads + confirmed writes)
//!     → dashboard poller and actions
//! ```

pub mod abi;
pub mod handle;
pub mod types;

pub use abi::PEGBREAKER_ADDRESS;
pub use handle::CallHandle;
pub use types::{BondTerm, CallError, CallResult, MarketCaps, TokenBalances, DAI_PRICE_DECIMALS};
