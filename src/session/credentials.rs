//! Durable client-side credential storage.
//!
//! The session persists exactly two string values between runs: the raw
//! bearer token under [`TOKEN_KEY`] and the user snapshot as JSON under
//! [`USER_KEY`]. The [`CredentialStore`] trait is the seam that keeps the
//! session store independent of where those values live:
//! [`FileCredentialStore`] writes one file per key under the user's data
//! directory, [`MemoryCredentialStore`] backs tests and headless runs.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;

use crate::error::{KardexError, Result};

/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key holding the user profile as JSON
pub const USER_KEY: &str = "user";

// ---------------------------------------------------------------------------
// CredentialStore
// ---------------------------------------------------------------------------

/// Key-value storage for session credentials
///
/// Keys are simple identifiers (the two constants above); values are opaque
/// strings. Absent keys read as `Ok(None)` so callers can distinguish "not
/// logged in" from a genuine storage failure.
pub trait CredentialStore: Send + Sync {
    /// Reads the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; a no-op when the key does not exist
    fn delete(&self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileCredentialStore
// ---------------------------------------------------------------------------

/// Credential store writing one file per key
///
/// Files live in the user's data directory by default. The directory can be
/// overridden with the `KARDEX_CREDENTIALS_DIR` environment variable or the
/// [`FileCredentialStore::new_with_dir`] constructor, which tests use to
/// point at a temporary directory.
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store in the user's data directory
    ///
    /// # Errors
    ///
    /// Returns [`KardexError::Storage`] when the data directory cannot be
    /// determined or created.
    pub fn new() -> Result<Self> {
        if let Ok(override_dir) = std::env::var("KARDEX_CREDENTIALS_DIR") {
            return Self::new_with_dir(override_dir);
        }

        let proj_dirs = ProjectDirs::from("com", "kardex", "kardex")
            .ok_or_else(|| KardexError::Storage("Could not determine data directory".into()))?;

        Self::new_with_dir(proj_dirs.data_dir().join("credentials"))
    }

    /// Creates a store rooted at the given directory
    ///
    /// # Examples
    ///
    /// ```
    /// use kardex::session::credentials::FileCredentialStore;
    ///
    /// let dir = std::env::temp_dir().join("kardex_doc_example");
    /// let store = FileCredentialStore::new_with_dir(&dir).unwrap();
    /// # let _ = std::fs::remove_dir_all(dir);
    /// ```
    pub fn new_with_dir<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            KardexError::Storage(format!(
                "Failed to create credentials directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(KardexError::Storage(format!("Failed to read credential {}: {}", key, e)).into())
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value).map_err(|e| {
            KardexError::Storage(format!("Failed to write credential {}: {}", key, e))
        })?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KardexError::Storage(format!(
                "Failed to delete credential {}: {}",
                key, e
            ))
            .into()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryCredentialStore
// ---------------------------------------------------------------------------

/// In-memory credential store for tests and headless contexts
///
/// Nothing survives the process; a session restored from this store is
/// always anonymous unless the same process logged in earlier.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| KardexError::Storage("Credential store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| KardexError::Storage("Credential store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| KardexError::Storage("Credential store lock poisoned".into()))?;
        values.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
