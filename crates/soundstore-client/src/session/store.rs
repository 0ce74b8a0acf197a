//! Credential stores
//!
//! The session token and its expiration live in an explicitly owned,
//! injected store rather than an ambient global. The session manager is
//! the only writer; every other component only reads the token to attach
//! an authorization header.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Store key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth-token";

/// Store key holding the session expiration as an ISO timestamp string.
pub const AUTH_EXPIRATION_KEY: &str = "auth-expiration";

/// Key-value slot for persisted session credentials.
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.slots).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.slots).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.slots).remove(key);
        Ok(())
    }
}

/// Credential store persisted as a small JSON map on disk.
///
/// Hydrates from the file on creation and rewrites it on every change, so
/// a session survives process restarts until logout or expiration clears
/// the slot. An unreadable or corrupted file hydrates as empty.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    slots: Mutex<HashMap<String, String>>,
}

impl FileCredentialStore {
    /// Opens the store at `path`, hydrating any persisted slots.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = Self::hydrate(&path);

        Self {
            path,
            slots: Mutex::new(slots),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn hydrate(path: &Path) -> HashMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return HashMap::new();
        };

        match serde_json::from_str(&raw) {
            Ok(slots) => slots,
            Err(err) => {
                tracing::warn!(
                    target: crate::TRACING_TARGET_SESSION,
                    path = %path.display(),
                    error = %err,
                    "Ignoring corrupted credential file"
                );
                HashMap::new()
            }
        }
    }

    fn persist(&self, slots: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(slots)?;
        std::fs::write(&self.path, raw).map_err(|err| {
            Error::store(format!(
                "failed to write {}: {err}",
                self.path.display()
            ))
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.slots).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = lock(&self.slots);
        slots.insert(key.to_string(), value.to_string());
        self.persist(&slots)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = lock(&self.slots);
        if slots.remove(key).is_some() {
            self.persist(&slots)?;
        }
        Ok(())
    }
}
