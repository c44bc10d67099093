//! Dashboard polling service.
//!
//! # Responsibilities
//! - Re-read the contract getters on an interval while a session exists
//! - Skip ticks with no call handle, reset the snapshot on disconnect
//! - Publish each refresh through a lock-free snapshot cell
//!
//! The poller reacts to session changes immediately: a fresh connect
//! triggers a refresh without waiting for the next tick, a disconnect
//! clears the snapshot so no call is ever made against a stale handle.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;

use crate::contract::CallHandle;
use crate::dashboard::snapshot::{
    format_native, format_price, BalanceView, DashboardSnapshot, MarketCapView,
};
use crate::session::Session;

/// Periodic reader of the five dashboard getters plus the native balance.
pub struct DashboardPoller {
    sessions: watch::Receiver<Arc<Session>>,
    snapshot: Arc<ArcSwap<DashboardSnapshot>>,
    interval: Duration,
}

impl DashboardPoller {
    pub fn new(sessions: watch::Receiver<Arc<Session>>, interval: Duration) -> Self {
        Self {
            sessions,
            snapshot: Arc::new(ArcSwap::from_pointee(DashboardSnapshot::default())),
            interval,
        }
    }

    /// The published snapshot cell. Reads never block.
    pub fn snapshot_cell(&self) -> Arc<ArcSwap<DashboardSnapshot>> {
        self.snapshot.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<DashboardSnapshot> {
        self.snapshot.load_full()
    }

    /// Run until shutdown or until the session channel closes.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                changed = self.sessions.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let session = self.sessions.borrow_and_update().clone();
                    match session.call_handle.as_ref() {
                        Some(handle) => {
                            let next = refresh(handle, &self.snapshot.load_full()).await;
                            self.snapshot.store(Arc::new(next));
                            ticker.reset();
                        }
                        None => {
                            self.snapshot.store(Arc::new(DashboardSnapshot::default()));
                        }
                    }
                }
                _ = ticker.tick() => {
                    let session = self.sessions.borrow().clone();
                    let Some(handle) = session.call_handle.as_ref() else {
                        continue;
                    };
                    let next = refresh(handle, &self.snapshot.load_full()).await;
                    self.snapshot.store(Arc::new(next));
                }
            }
        }
        tracing::debug!("Dashboard poller stopped");
    }
}

/// One refresh pass. Sections fail independently and keep last-good values.
pub async fn refresh(handle: &CallHandle, prev: &DashboardSnapshot) -> DashboardSnapshot {
    let mut next = prev.clone();
    next.errors.clear();
    let account = handle.account();

    match handle.token_balances(account).await {
        Ok(balances) => next.balances = Some(BalanceView::from(balances)),
        Err(e) => {
            tracing::warn!(error = %e, "Error fetching balances");
            next.errors.push("Failed to fetch token balances.".to_string());
        }
    }

    match handle.dai_price().await {
        Ok(price) => next.dai_price = Some(format_price(price)),
        Err(e) => {
            tracing::warn!(error = %e, "Error fetching DAI price");
            next.errors.push("Failed to fetch DAI price.".to_string());
        }
    }

    match handle.epoch_complete().await {
        Ok(complete) => next.epoch_complete = Some(complete),
        Err(e) => {
            tracing::warn!(error = %e, "Error checking epoch status");
            next.errors.push("Failed to check epoch status.".to_string());
        }
    }

    match handle.market_caps().await {
        Ok(caps) => next.market_caps = Some(MarketCapView::from(caps)),
        Err(e) => {
            tracing::warn!(error = %e, "Error fetching market caps");
            next.errors.push("Failed to fetch market caps.".to_string());
        }
    }

    match handle.native_balance(account).await {
        Ok(balance) => next.native_balance = Some(format_native(balance)),
        Err(e) => {
            tracing::warn!(error = %e, "Error fetching native balance");
            next.errors.push("Failed to fetch native balance.".to_string());
        }
    }

    tracing::debug!(
        account = %account,
        dai_price = ?next.dai_price,
        epoch_complete = ?next.epoch_complete,
        errors = next.errors.len(),
        "Dashboard refreshed"
    );

    next
}
