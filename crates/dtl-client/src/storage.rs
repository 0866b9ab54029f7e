//! Local persistent storage for the session credentials.
//!
//! Two fixed keys are used: [`TOKEN_KEY`] holds the bearer token and
//! [`USER_ID_KEY`] the logged-in user's identifier. Both are written at login
//! and removed at logout; the token is read before every request.

use std::{
    collections::{BTreeMap, HashMap},
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use crate::error::{ClientError, ClientResult};

/// Key of the bearer token
pub const TOKEN_KEY: &str = "token";
/// Key of the logged-in user's identifier
pub const USER_ID_KEY: &str = "userId";

/// String key/value storage that survives between client runs
pub trait TokenStore: fmt::Debug + Send + Sync {
    /// Stored value for `key`, `None` when absent
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    /// Delete `key`; absent keys are not an error
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// In-process store, nothing is persisted
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// JSON object on disk, re-read on every access so separate processes see
/// each other's logins and logouts.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by the JSON file at `path`, created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ClientResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.storage_error(e)),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| self.storage_error(e))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }

        let contents = serde_json::to_string_pretty(entries).map_err(|e| self.storage_error(e))?;

        // Readers see either the old file or the new one, never a partial write
        let staging = self.path.with_extension("json.tmp");
        write_private(&staging, contents.as_bytes()).map_err(|e| self.storage_error(e))?;
        fs::rename(&staging, &self.path).map_err(|e| self.storage_error(e))?;

        Ok(())
    }

    fn storage_error(&self, e: impl fmt::Display) -> ClientError {
        ClientError::Storage(format!("{}: {e}", self.path.display()))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Write `contents` to a fresh file only the owner can read.
///
/// The mode is set when the file is created, so the token is never on disk
/// with wider permissions. A staging file left by an interrupted write is
/// removed first, since `mode` does not apply to files that already exist.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::{io::Write, os::unix::fs::OpenOptionsExt};

    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}
