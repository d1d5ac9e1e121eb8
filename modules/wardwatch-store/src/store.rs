//! IssueStore — the single source of truth for issue records and the ban
//! list.
//!
//! There is no locking. Contexts race last-writer-wins at the file layer;
//! a write from one context can silently overwrite a concurrent write from
//! another. That lost-update hazard is documented, not fixed.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

use wardwatch_common::Issue;

/// Buffered change signals per subscriber before a slow one starts lagging.
const CHANGE_BUS_CAPACITY: usize = 16;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Well-known storage keys, one per persisted blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Issues,
    BannedUsers,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Issues => "issues.json",
            StorageKey::BannedUsers => "banned_users.json",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File-backed store. Cheap to clone; clones share the change bus, the way
/// two views of the same browsing session share storage events.
#[derive(Clone)]
pub struct IssueStore {
    data_dir: PathBuf,
    changes: broadcast::Sender<StorageKey>,
}

impl IssueStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        let (changes, _) = broadcast::channel(CHANGE_BUS_CAPACITY);
        Ok(Self { data_dir, changes })
    }

    /// Load the issue collection, newest first.
    ///
    /// A missing or unparseable blob is an empty collection — bad persisted
    /// state never crashes the caller.
    pub fn load(&self) -> Vec<Issue> {
        self.read_key(StorageKey::Issues)
    }

    /// Persist the full issue collection. Total-overwrite semantics: there
    /// are no partial or merge writes.
    pub fn save(&self, issues: &[Issue]) -> Result<()> {
        self.write_key(StorageKey::Issues, issues)
    }

    /// Load the banned-user list. Same degrade-to-empty semantics as `load`.
    pub fn banned_users(&self) -> Vec<String> {
        self.read_key(StorageKey::BannedUsers)
    }

    /// Persist the full banned-user list.
    pub fn save_banned_users(&self, banned: &[String]) -> Result<()> {
        self.write_key(StorageKey::BannedUsers, banned)
    }

    /// Subscribe to change signals. Each save delivers the changed key to
    /// every live subscriber on this store and its clones. A lagged receiver
    /// drops signals; catch-up is a fresh `load()`.
    pub fn subscribe(&self) -> broadcast::Receiver<StorageKey> {
        self.changes.subscribe()
    }

    fn read_key<T: DeserializeOwned + Default>(&self, key: StorageKey) -> T {
        let path = self.data_dir.join(key.as_str());
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read blob, treating as empty");
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Malformed blob, treating as empty");
                T::default()
            }
        }
    }

    fn write_key<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;

        // Write-then-rename so a crashed save never leaves a torn blob.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(self.data_dir.join(key.as_str()))
            .map_err(|e| StoreError::Io(e.error))?;

        self.notify_changed(key);
        Ok(())
    }

    /// Best-effort change signal — a nudge to other live views, not a
    /// delivery guarantee.
    fn notify_changed(&self, key: StorageKey) {
        let _ = self.changes.send(key);
    }
}
