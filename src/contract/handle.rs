//! Bound contract call handle.
//!
//! # Responsibilities
//! - Hold the (account, chain, contract instance) binding for one signer
//! - Expose typed reads over the dashboard getters
//! - Submit state-changing calls and await their receipts
//!
//! State-changing calls are final only once the receipt is in; a mined but
//! reverted transaction is an error, not a success.

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider};
use alloy::rpc::types::TransactionReceipt;

use crate::contract::abi::Pegbreaker::{self, PegbreakerInstance};
use crate::contract::types::{CallError, CallResult, MarketCaps, TokenBalances};
use crate::contract::BondTerm;
use crate::provider::ChainId;

/// Opaque binding enabling read/write invocations against the Pegbreaker
/// contract for a specific signer.
#[derive(Clone)]
pub struct CallHandle {
    account: Address,
    chain_id: ChainId,
    contract: PegbreakerInstance<DynProvider>,
}

impl CallHandle {
    /// Bind a handle for `account` on `chain_id` against the deployed
    /// contract, through a signing-capable provider.
    pub fn bind(
        account: Address,
        chain_id: ChainId,
        contract_address: Address,
        provider: DynProvider,
    ) -> Self {
        Self {
            account,
            chain_id,
            contract: Pegbreaker::new(contract_address, provider),
        }
    }

    /// The signer account this handle is bound to.
    pub fn account(&self) -> Address {
        self.account
    }

    /// The chain this handle was bound on.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// The deployed contract address.
    pub fn contract_address(&self) -> Address {
        *self.contract.address()
    }

    /// DPG/DAI/DPB balances of `account`, in wei.
    pub async fn token_balances(&self, account: Address) -> CallResult<TokenBalances> {
        let balances = self
            .contract
            .getTokenBalances(account)
            .call()
            .await
            .map_err(|e| CallError::Call(e.to_string()))?;
        Ok(TokenBalances {
            dpg: balances.dpg,
            dai: balances.dai,
            dpb: balances.dpb,
        })
    }

    /// DAI price, 8-decimal fixed point.
    pub async fn dai_price(&self) -> CallResult<U256> {
        self.contract
            .getDAIPrice()
            .call()
            .await
            .map_err(|e| CallError::Call(e.to_string()))
    }

    /// Market caps of the three protocol tokens, 18-decimal fixed point.
    pub async fn market_caps(&self) -> CallResult<MarketCaps> {
        let dpg = self
            .contract
            .getDPGMarketCap()
            .call()
            .await
            .map_err(|e| CallError::Call(e.to_string()))?;
        let dai = self
            .contract
            .getDAIMarketCap()
            .call()
            .await
            .map_err(|e| CallError::Call(e.to_string()))?;
        let dpb = self
            .contract
            .getDPBMarketCap()
            .call()
            .await
            .map_err(|e| CallError::Call(e.to_string()))?;
        Ok(MarketCaps { dpg, dai, dpb })
    }

    /// Whether the current protocol epoch has completed.
    pub async fn epoch_complete(&self) -> CallResult<bool> {
        self.contract
            .isEpochComplete()
            .call()
            .await
            .map_err(|e| CallError::Call(e.to_string()))
    }

    /// Native-token balance of `account`, in wei.
    pub async fn native_balance(&self, account: Address) -> CallResult<U256> {
        self.contract
            .provider()
            .get_balance(account)
            .await
            .map_err(|e| CallError::Call(e.to_string()))
    }

    /// Stake `amount` wei of DPG. Final once confirmed.
    pub async fn stake_dpg(&self, amount: U256) -> CallResult<TransactionReceipt> {
        let pending = self
            .contract
            .stakeDPG(amount)
            .send()
            .await
            .map_err(|e| CallError::Call(e.to_string()))?;
        confirm(pending).await
    }

    /// Mint DPG against `amount` wei of DAI collateral.
    pub async fn mint_dpg_with_dai(&self, amount: U256) -> CallResult<TransactionReceipt> {
        let pending = self
            .contract
            .mintDPGWithDAI(amount)
            .send()
            .await
            .map_err(|e| CallError::Call(e.to_string()))?;
        confirm(pending).await
    }

    /// Burn `amount` wei of DPG.
    pub async fn burn_dpg(&self, amount: U256) -> CallResult<TransactionReceipt> {
        let pending = self
            .contract
            .burnDPG(amount)
            .send()
            .await
            .map_err(|e| CallError::Call(e.to_string()))?;
        confirm(pending).await
    }

    /// Issue a DPB bond of the given term.
    pub async fn issue_bond(&self, term: BondTerm) -> CallResult<TransactionReceipt> {
        let pending = self
            .contract
            .issueBond(term.bond_type())
            .send()
            .await
            .map_err(|e| CallError::Call(e.to_string()))?;
        confirm(pending).await
    }
}

async fn confirm(
    pending: PendingTransactionBuilder<Ethereum>,
) -> CallResult<TransactionReceipt> {
    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| CallError::Call(e.to_string()))?;
    if !receipt.status() {
        return Err(CallError::Reverted(format!(
            "transaction {} reverted",
            receipt.transaction_hash
        )));
    }
    Ok(receipt)
}

impl std::fmt::Debug for CallHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallHandle")
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .field("contract", self.contract.address())
            .finish()
    }
}
