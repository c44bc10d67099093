//! Wallet session value.

use alloy::primitives::Address;

use crate::contract::CallHandle;
use crate::provider::ChainId;

/// The current wallet connection: (account, chain id, call handle).
///
/// Terminal states after a settled connect or disconnect are fully-populated
/// or fully-null. A session restored from disk carries the persisted
/// account/chain pair with no call handle until the next connect; the pair
/// is unverified until then.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Currently selected wallet account; `None` when disconnected.
    pub account: Option<Address>,
    /// Connected network; `None` when disconnected.
    pub chain_id: Option<ChainId>,
    /// Contract binding for the account; `None` when disconnected.
    pub call_handle: Option<CallHandle>,
}

impl Session {
    /// The fully-null session.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// A session seeded from persisted state. No call handle yet.
    pub fn restored(account: Option<Address>, chain_id: Option<ChainId>) -> Self {
        Self {
            account,
            chain_id,
            call_handle: None,
        }
    }

    /// A fully-populated session.
    pub fn connected(account: Address, chain_id: ChainId, call_handle: CallHandle) -> Self {
        Self {
            account: Some(account),
            chain_id: Some(chain_id),
            call_handle: Some(call_handle),
        }
    }

    /// All three fields populated.
    pub fn is_connected(&self) -> bool {
        self.account.is_some() && self.chain_id.is_some() && self.call_handle.is_some()
    }

    /// All three fields null.
    pub fn is_disconnected(&self) -> bool {
        self.account.is_none() && self.chain_id.is_none() && self.call_handle.is_none()
    }
}
