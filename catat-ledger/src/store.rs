//! Ledger persistence.
//!
//! The engine only needs `load`/`save` per user. Each `save` must be visible
//! to the next `load`, and a `load` must never observe half a write. Stores
//! shared between processes also serialize whole mutation sequences through
//! [`LedgerStore::exclusive`].

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use catat_core::UserLedger;
use fd_lock::RwLock as FileLock;
use tracing::debug;

use crate::error::StoreError;

pub trait LedgerStore: Send + Sync {
    /// `None` while the user has never written anything.
    fn load(&self, user: &str) -> Result<Option<UserLedger>, StoreError>;
    fn save(&self, user: &str, ledger: &UserLedger) -> Result<(), StoreError>;

    /// Run a load-modify-save sequence with no other writer of this store in
    /// between, including writers in other processes. In-process stores
    /// rely on the engine's per-user locks and just run `f`.
    fn exclusive<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized,
        E: From<StoreError>,
    {
        f()
    }
}

/// Process-local store, mostly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledgers: RwLock<HashMap<String, UserLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self, user: &str) -> Result<Option<UserLedger>, StoreError> {
        let guard = self.ledgers.read().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(user).cloned())
    }

    fn save(&self, user: &str, ledger: &UserLedger) -> Result<(), StoreError> {
        let mut guard = self.ledgers.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(user.to_string(), ledger.clone());
        Ok(())
    }
}

type LedgerFile = BTreeMap<String, UserLedger>;

/// All users in one JSON document: `{ "<user>": { "transactions": [...], "categories": [...] } }`.
///
/// Writes go to a temp file that is renamed over the target. The internal
/// mutex serializes whole-file read-modify-write across users; an advisory
/// lock on `<file>.lock` does the same across processes for every
/// [`exclusive`](LedgerStore::exclusive) section.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    io: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file carrying the cross-process lock, e.g. `finance-data.json.lock`.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn read_all(&self) -> Result<LedgerFile, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(LedgerFile::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(LedgerFile::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, file: &LedgerFile) -> Result<(), StoreError> {
        self.ensure_parent()?;

        let json = serde_json::to_string_pretty(file)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        if fs::rename(&tmp, &self.path).is_err() {
            fs::copy(&tmp, &self.path)?;
            let _ = fs::remove_file(&tmp);
        }
        Ok(())
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self, user: &str) -> Result<Option<UserLedger>, StoreError> {
        let _io = self.io.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.read_all()?;
        debug!(user, path = %self.path.display(), "ledger loaded");
        Ok(file.remove(user))
    }

    fn save(&self, user: &str, ledger: &UserLedger) -> Result<(), StoreError> {
        let _io = self.io.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.read_all()?;
        file.insert(user.to_string(), ledger.clone());
        self.write_all(&file)?;
        debug!(user, count = ledger.transactions.len(), "ledger saved");
        Ok(())
    }

    fn exclusive<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized,
        E: From<StoreError>,
    {
        self.ensure_parent()?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(StoreError::from)?;
        let mut lock = FileLock::new(file);
        let _held = lock.write().map_err(StoreError::from)?;
        f()
    }
}
