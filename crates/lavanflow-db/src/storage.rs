//! # Storage Backends
//!
//! Where the serialized document physically lives.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StorageBackend                                                         │
//! │  ├── JsonFileStorage  ← production: one JSON file on disk              │
//! │  │     save(): write <file>.tmp, then rename over <file>               │
//! │  │     (a reader sees the old or the new document, never half)         │
//! │  └── MemoryStorage    ← tests and ephemeral sessions                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{DbError, DbResult};

/// Raw access to the serialized document.
pub trait StorageBackend: Send + Sync + fmt::Debug {
    /// Returns the stored document, or `None` if nothing was stored yet.
    fn load(&self) -> DbResult<Option<String>>;

    /// Replaces the stored document.
    fn save(&self, contents: &str) -> DbResult<()>;
}

// =============================================================================
// File Storage
// =============================================================================

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StorageBackend for JsonFileStorage {
    fn load(&self) -> DbResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, contents: &str) -> DbResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;

        debug!(path = %self.path.display(), bytes = contents.len(), "Document written");
        Ok(())
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Starts from an existing serialized document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemoryStorage {
            slot: Mutex::new(Some(contents.into())),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> DbResult<Option<String>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| DbError::Storage("memory storage lock poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, contents: &str) -> DbResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| DbError::Storage("memory storage lock poisoned".to_string()))?;
        *slot = Some(contents.to_string());
        Ok(())
    }
}
