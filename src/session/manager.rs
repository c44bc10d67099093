//! Wallet session manager.
//!
//! # Responsibilities
//! - Own the session value and mediate every mutation
//! - Persist the (account, chain id) pair across restarts
//! - Consume wallet push notifications (account switch, chain switch)
//! - Fan out session changes to subscribers
//!
//! # State Transitions
//! ```text
//! Disconnected → Connected: connect() only
//! Connected → Disconnected: disconnect() only
//! Connected → Connected:    on_accounts_changed / on_chain_changed
//! ```
//!
//! Mutations replace the session value atomically through a watch channel;
//! a reader observes either the prior session or the fully-new one, never a
//! partial write. A second `connect()` while one is awaiting the provider
//! fails fast instead of racing the persisted pair. An in-flight connect is
//! never cancelled: if the provider never answers, the call stays pending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy::primitives::Address;
use thiserror::Error;
use tokio::sync::{broadcast, watch};

use crate::provider::{ChainId, ProviderError, ProviderGateway, WalletEvent};
use crate::session::state::Session;
use crate::session::store::{SessionStore, StoreError};

/// Errors reported by session operations. All are user-visible and
/// non-fatal.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No wallet provider is injected; the session was left unchanged.
    #[error("no wallet provider is available")]
    ProviderUnavailable,

    /// A step of the connect sequence failed; the session was left at its
    /// prior value.
    #[error("wallet connect failed: {source}")]
    ConnectFailed {
        #[source]
        source: ProviderError,
    },

    /// A connect was already awaiting the provider.
    #[error("a wallet connect is already in flight")]
    ConnectInFlight,

    /// Durable storage failed. The in-memory transition already settled.
    #[error("session persistence failed: {0}")]
    Persistence(#[source] StoreError),
}

/// Owner of the process-wide wallet session.
pub struct SessionManager {
    gateway: ProviderGateway,
    store: Arc<dyn SessionStore>,
    contract_address: Address,
    sessions: watch::Sender<Arc<Session>>,
    connecting: AtomicBool,
}

impl SessionManager {
    /// Create a manager seeded from persisted state.
    ///
    /// The restored account/chain pair is unverified and carries no call
    /// handle; `connect()` is the only path to a fully-populated session.
    pub fn new(
        gateway: ProviderGateway,
        store: Arc<dyn SessionStore>,
        contract_address: Address,
    ) -> Self {
        let persisted = store.load();
        let account = persisted
            .account
            .as_deref()
            .and_then(|s| s.parse::<Address>().ok());
        let chain_id = persisted.chain_id.map(ChainId);

        if account.is_some() || chain_id.is_some() {
            tracing::info!(
                account = ?account,
                chain_id = ?chain_id,
                "Restored persisted wallet session"
            );
        }

        let (sessions, _) = watch::channel(Arc::new(Session::restored(account, chain_id)));

        Self {
            gateway,
            store,
            contract_address,
            sessions,
            connecting: AtomicBool::new(false),
        }
    }

    /// The live session snapshot. Never blocks.
    pub fn current_session(&self) -> Arc<Session> {
        self.sessions.borrow().clone()
    }

    /// Subscribe to session changes. The receiver always holds the latest
    /// session value.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Session>> {
        self.sessions.subscribe()
    }

    /// Connect the wallet: request accounts, read the chain id, bind a call
    /// handle for the first account, replace the session atomically and
    /// persist the pair.
    ///
    /// On any provider failure the session keeps its prior value. A
    /// `Persistence` error means the session transition settled but the
    /// durable write failed; `current_session()` holds the new session.
    pub async fn connect(&self) -> Result<Arc<Session>, SessionError> {
        if !self.gateway.detected() {
            return Err(SessionError::ProviderUnavailable);
        }
        if self
            .connecting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SessionError::ConnectInFlight);
        }

        let result = self.connect_inner().await;
        self.connecting.store(false, Ordering::SeqCst);
        result
    }

    async fn connect_inner(&self) -> Result<Arc<Session>, SessionError> {
        let connect_failed = |source| SessionError::ConnectFailed { source };

        let accounts = self.gateway.request_accounts().await.map_err(connect_failed)?;
        let account = accounts
            .first()
            .copied()
            .ok_or(SessionError::ConnectFailed {
                source: ProviderError::NoAccounts,
            })?;
        let chain_id = self.gateway.current_chain_id().await.map_err(connect_failed)?;
        let call_handle = self
            .gateway
            .bind_call_handle(account, chain_id, self.contract_address)
            .await
            .map_err(connect_failed)?;

        let session = Arc::new(Session::connected(account, chain_id, call_handle));
        self.sessions.send_replace(session.clone());

        tracing::info!(
            account = %account,
            chain_id = %chain_id,
            contract = %self.contract_address,
            "Wallet connected"
        );

        self.store
            .save(&account.to_string(), chain_id.0)
            .map_err(SessionError::Persistence)?;

        Ok(session)
    }

    /// Clear the session and delete the persisted pair. Idempotent; the
    /// in-memory clear always settles even when storage fails.
    pub fn disconnect(&self) -> Result<(), SessionError> {
        self.sessions.send_replace(Arc::new(Session::disconnected()));
        tracing::info!("Wallet disconnected");

        self.store.clear().map_err(SessionError::Persistence)
    }

    /// Wallet-side account switch. Updates and persists the account only.
    ///
    /// The call handle keeps its previous binding: transactions submitted
    /// after a wallet-side switch are still signed by the prior account
    /// until the next `connect()`.
    pub fn on_accounts_changed(&self, accounts: &[String]) {
        if self.current_session().account.is_none() {
            tracing::debug!("Ignoring account change while disconnected");
            return;
        }
        let Some(first) = accounts.first() else {
            tracing::warn!("Account change carried no accounts, ignoring");
            return;
        };
        let account: Address = match first.parse() {
            Ok(account) => account,
            Err(_) => {
                tracing::warn!(account = %first, "Account change carried an invalid address, ignoring");
                return;
            }
        };

        self.sessions.send_modify(|session| {
            let mut next = (**session).clone();
            next.account = Some(account);
            *session = Arc::new(next);
        });
        tracing::warn!(
            account = %account,
            "Account switched; call handle still bound to the previous signer until reconnect"
        );

        if let Err(e) = self.store.save_account(&account.to_string()) {
            tracing::error!(error = %e, "Failed to persist switched account");
        }
    }

    /// Wallet-side chain switch. Decodes the hex payload, updates and
    /// persists the chain id only. The call handle is not rebound.
    pub fn on_chain_changed(&self, chain_id_hex: &str) {
        if self.current_session().account.is_none() {
            tracing::debug!("Ignoring chain change while disconnected");
            return;
        }
        let chain_id = match ChainId::from_hex(chain_id_hex) {
            Ok(chain_id) => chain_id,
            Err(e) => {
                tracing::warn!(error = %e, "Chain change carried an invalid chain id, ignoring");
                return;
            }
        };

        self.sessions.send_modify(|session| {
            let mut next = (**session).clone();
            next.chain_id = Some(chain_id);
            *session = Arc::new(next);
        });
        tracing::info!(chain_id = %chain_id, "Chain switched");

        if let Err(e) = self.store.save_chain_id(chain_id.0) {
            tracing::error!(error = %e, "Failed to persist switched chain id");
        }
    }

    /// Consume wallet push notifications until shutdown. Releases the
    /// provider subscription on exit.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        let Some(mut events) = self.gateway.subscribe() else {
            tracing::debug!("No wallet transport, session event loop idle");
            let _ = shutdown.recv().await;
            return;
        };

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                event = events.recv() => match event {
                    Ok(WalletEvent::AccountsChanged(accounts)) => {
                        self.on_accounts_changed(&accounts);
                    }
                    Ok(WalletEvent::ChainChanged(chain_id_hex)) => {
                        self.on_chain_changed(&chain_id_hex);
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Dropped wallet notifications");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        tracing::debug!("Session event loop stopped");
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.current_session();
        f.debug_struct("SessionManager")
            .field("account", &session.account)
            .field("chain_id", &session.chain_id)
            .field("connected", &session.is_connected())
            .finish()
    }
}
