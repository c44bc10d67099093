//! Durable session persistence.
//!
//! # Responsibilities
//! - Persist the (account, chain id) pair across restarts
//! - Treat corrupt or unparsable persisted values as absent, never fatal
//!
//! Two fixed string keys, written on every successful connect or push
//! notification and deleted on disconnect. The chain id is stored as a
//! decimal string.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage key for the selected account address.
pub const ACCOUNT_KEY: &str = "selected_account";
/// Storage key for the decimal chain id.
pub const CHAIN_ID_KEY: &str = "chain_id";

/// Errors from durable storage. Never aborts an in-memory transition.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The persisted pair, as read at startup. May be stale or unverified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSession {
    pub account: Option<String>,
    pub chain_id: Option<u64>,
}

/// Durable key-value storage for the session pair.
pub trait SessionStore: Send + Sync {
    /// Read the persisted pair. Corrupt entries load as absent.
    fn load(&self) -> PersistedSession;

    /// Persist both keys.
    fn save(&self, account: &str, chain_id: u64) -> Result<(), StoreError>;

    /// Persist the account key only.
    fn save_account(&self, account: &str) -> Result<(), StoreError>;

    /// Persist the chain id key only.
    fn save_chain_id(&self, chain_id: u64) -> Result<(), StoreError>;

    /// Delete both keys. Idempotent.
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed store holding the two keys in a small JSON map.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        // A mangled file is the same as an empty one.
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StoreError> {
        let mut map = self.read_map();
        apply(&mut map);
        self.write_map(&map)
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> PersistedSession {
        let map = self.read_map();
        let account = map.get(ACCOUNT_KEY).cloned().filter(|s| !s.is_empty());
        let chain_id = map.get(CHAIN_ID_KEY).and_then(|s| s.parse::<u64>().ok());
        PersistedSession { account, chain_id }
    }

    fn save(&self, account: &str, chain_id: u64) -> Result<(), StoreError> {
        self.update(|map| {
            map.insert(ACCOUNT_KEY.to_string(), account.to_string());
            map.insert(CHAIN_ID_KEY.to_string(), chain_id.to_string());
        })
    }

    fn save_account(&self, account: &str) -> Result<(), StoreError> {
        self.update(|map| {
            map.insert(ACCOUNT_KEY.to_string(), account.to_string());
        })
    }

    fn save_chain_id(&self, chain_id: u64) -> Result<(), StoreError> {
        self.update(|map| {
            map.insert(CHAIN_ID_KEY.to_string(), chain_id.to_string());
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
