//! Dashboard poller behavior tests.
//!
//! The call handles here are bound to an unreachable endpoint: every
//! contract read fails fast, which is enough to observe whether the poller
//! attempted a refresh at all.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use pegbreaker_dashboard::contract::CallHandle;
use pegbreaker_dashboard::dashboard::poller::{self, DashboardPoller};
use pegbreaker_dashboard::dashboard::DashboardSnapshot;
use pegbreaker_dashboard::lifecycle::Shutdown;
use pegbreaker_dashboard::provider::ChainId;
use pegbreaker_dashboard::session::Session;

mod common;
use common::{contract_address, unreachable_provider, ACCOUNT_ONE};

fn unreachable_handle() -> CallHandle {
    CallHandle::bind(
        ACCOUNT_ONE.parse().unwrap(),
        ChainId(1),
        contract_address(),
        unreachable_provider(),
    )
}

fn connected_session() -> Arc<Session> {
    let account = ACCOUNT_ONE.parse().unwrap();
    Arc::new(Session::connected(account, ChainId(1), unreachable_handle()))
}

#[tokio::test]
async fn test_refresh_degrades_sections_independently() {
    let snapshot = poller::refresh(&unreachable_handle(), &DashboardSnapshot::default()).await;

    assert!(snapshot.balances.is_none());
    assert!(snapshot.market_caps.is_none());
    assert!(snapshot.dai_price.is_none());
    assert!(snapshot.epoch_complete.is_none());

    assert!(snapshot
        .errors
        .contains(&"Failed to fetch token balances.".to_string()));
    assert!(snapshot
        .errors
        .contains(&"Failed to fetch DAI price.".to_string()));
    assert!(snapshot
        .errors
        .contains(&"Failed to check epoch status.".to_string()));
    assert!(snapshot
        .errors
        .contains(&"Failed to fetch market caps.".to_string()));
    assert!(snapshot
        .errors
        .contains(&"Failed to fetch native balance.".to_string()));
}

#[tokio::test]
async fn test_poller_skips_ticks_without_a_call_handle() {
    let (_sessions_tx, sessions_rx) = watch::channel(Arc::new(Session::disconnected()));
    let poller = DashboardPoller::new(sessions_rx, Duration::from_millis(10));
    let cell = poller.snapshot_cell();

    let shutdown = Shutdown::new();
    let task = tokio::spawn(poller.run(shutdown.subscribe()));
    tokio::time::sleep(Duration::from_millis(80)).await;

    // Several ticks elapsed, none of them touched the snapshot
    let snapshot = cell.load_full();
    assert!(snapshot.errors.is_empty());
    assert!(snapshot.balances.is_none());

    shutdown.trigger();
    task.await.unwrap();
}

#[tokio::test]
async fn test_session_change_triggers_immediate_refresh() {
    let (sessions_tx, sessions_rx) = watch::channel(Arc::new(Session::disconnected()));
    // Long interval: only the session-change path can refresh in time
    let poller = DashboardPoller::new(sessions_rx, Duration::from_secs(600));
    let cell = poller.snapshot_cell();

    let shutdown = Shutdown::new();
    let task = tokio::spawn(poller.run(shutdown.subscribe()));
    tokio::time::sleep(Duration::from_millis(20)).await;

    sessions_tx.send(connected_session()).unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    let snapshot = cell.load_full();
    assert!(
        !snapshot.errors.is_empty(),
        "a refresh should have been attempted on connect"
    );

    shutdown.trigger();
    task.await.unwrap();
}

#[tokio::test]
async fn test_poller_resets_snapshot_when_session_clears() {
    let (sessions_tx, sessions_rx) = watch::channel(connected_session());
    let poller = DashboardPoller::new(sessions_rx, Duration::from_millis(50));
    let cell = poller.snapshot_cell();

    let shutdown = Shutdown::new();
    let task = tokio::spawn(poller.run(shutdown.subscribe()));

    // Wait until at least one refresh attempt landed
    let mut attempts = 0;
    while cell.load().errors.is_empty() && attempts < 50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        attempts += 1;
    }
    assert!(!cell.load().errors.is_empty());

    sessions_tx
        .send(Arc::new(Session::disconnected()))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let snapshot = cell.load_full();
    assert!(snapshot.errors.is_empty());
    assert!(snapshot.balances.is_none());

    shutdown.trigger();
    task.await.unwrap();
}
