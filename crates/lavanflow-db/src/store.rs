//! # Document Store
//!
//! Owns the storage backend and serializes every access to the document.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Document Store                                   │
//! │                                                                         │
//! │  StoreConfig::from_env() / ::new(path) / ::in_memory()                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DocumentStore::open(config) ← seeds the backend if it is empty        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  tokio::Mutex<()>  (one call at a time) │                           │
//! │  │                                         │                           │
//! │  │   read(f):  load ──► f(&doc)            │                           │
//! │  │   write(f): load ──► f(&mut doc) ──► save (only if f succeeded)    │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageBackend (JsonFileStorage | MemoryStorage)  on spawn_blocking   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two concurrent calls never interleave their read-modify-write cycles, so
//! no update is lost and no two burns can hand out the same voucher number.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use directories::ProjectDirs;
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, info, warn};

use crate::document::Document;
use crate::error::{DbError, DbResult};
use crate::seed;
use crate::storage::{JsonFileStorage, MemoryStorage, StorageBackend};

/// Logical name of the persisted document.
pub const STORAGE_KEY: &str = "lavanflow_db";

/// Simulated network latency applied to every endpoint call by default.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(400);

// =============================================================================
// Configuration
// =============================================================================

/// Where the document is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    Memory,
}

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data/lavanflow_db.json")
///     .latency(Duration::from_millis(50));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backing storage for the document.
    pub location: StorageLocation,

    /// Delay before every endpoint call completes.
    /// Default: 400ms
    pub latency: Duration,
}

impl StoreConfig {
    /// Configuration for a JSON file at `path`. Created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            location: StorageLocation::File(path.into()),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Sets the simulated latency.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// An isolated in-memory store with no latency (for testing).
    pub fn in_memory() -> Self {
        StoreConfig {
            location: StorageLocation::Memory,
            latency: Duration::ZERO,
        }
    }

    /// Reads `LAVANFLOW_DB_PATH` and `LAVANFLOW_API_LATENCY_MS`.
    ///
    /// Without a path, the document goes to the platform data directory.
    pub fn from_env() -> DbResult<Self> {
        let path = match env::var("LAVANFLOW_DB_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_document_path()?,
        };

        let mut config = StoreConfig::new(path);

        if let Ok(raw) = env::var("LAVANFLOW_API_LATENCY_MS") {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                DbError::InvalidConfig(format!("LAVANFLOW_API_LATENCY_MS: '{}' is not a number", raw))
            })?;
            config = config.latency(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

/// `<platform data dir>/lavanflow_db.json`.
pub fn default_document_path() -> DbResult<PathBuf> {
    let dirs = ProjectDirs::from("com", "lavanflow", "lavanflow-os").ok_or_else(|| {
        DbError::InvalidConfig("could not determine a home directory".to_string())
    })?;
    Ok(dirs.data_dir().join(format!("{}.json", STORAGE_KEY)))
}

// =============================================================================
// DocumentStore
// =============================================================================

/// Serialized access to the single persisted document.
#[derive(Debug)]
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    lock: Mutex<()>,
}

impl DocumentStore {
    /// Opens the store described by `config`, seeding it if it is empty.
    pub async fn open(config: &StoreConfig) -> DbResult<Self> {
        let backend: Arc<dyn StorageBackend> = match &config.location {
            StorageLocation::File(path) => {
                info!(path = %path.display(), "Opening document store");
                Arc::new(JsonFileStorage::new(path.clone()))
            }
            StorageLocation::Memory => {
                info!("Opening in-memory document store");
                Arc::new(MemoryStorage::new())
            }
        };

        let store = DocumentStore::with_backend(backend);
        store.ensure_seeded().await?;
        Ok(store)
    }

    /// Wraps an existing backend without seeding it.
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        DocumentStore {
            backend,
            lock: Mutex::new(()),
        }
    }

    /// Writes the default document if nothing is stored yet.
    pub async fn ensure_seeded(&self) -> DbResult<()> {
        let _guard = self.lock.lock().await;
        if self.load_raw().await?.is_none() {
            info!("No document found, writing seed data");
            self.save_raw(seed::default_document(Utc::now()).to_json()?).await?;
        }
        Ok(())
    }

    /// Replaces whatever is stored with the default document.
    pub async fn reset(&self) -> DbResult<()> {
        let _guard = self.lock.lock().await;
        warn!("Resetting document to seed data");
        self.save_raw(seed::default_document(Utc::now()).to_json()?).await
    }

    /// Runs `f` against a snapshot of the document.
    pub async fn read<T, F>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Document) -> DbResult<T>,
    {
        let _guard = self.lock.lock().await;
        let doc = self.load_document().await?;
        f(&doc)
    }

    /// Runs `f` against the document and persists the result.
    ///
    /// Nothing is written when `f` fails, so a rejected call leaves the
    /// document untouched.
    pub async fn write<T, F>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&mut Document) -> DbResult<T>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_document().await?;
        let out = f(&mut doc)?;
        self.save_raw(doc.to_json()?).await?;
        debug!("Document committed");
        Ok(out)
    }

    async fn load_document(&self) -> DbResult<Document> {
        match self.load_raw().await? {
            Some(contents) => Document::from_json(&contents),
            None => Ok(seed::default_document(Utc::now())),
        }
    }

    // Backends do blocking file I/O; keep it off the async workers.
    async fn load_raw(&self) -> DbResult<Option<String>> {
        let backend = Arc::clone(&self.backend);
        task::spawn_blocking(move || backend.load())
            .await
            .map_err(|e| DbError::Storage(format!("storage task failed: {}", e)))?
    }

    async fn save_raw(&self, contents: String) -> DbResult<()> {
        let backend = Arc::clone(&self.backend);
        task::spawn_blocking(move || backend.save(&contents))
            .await
            .map_err(|e| DbError::Storage(format!("storage task failed: {}", e)))?
    }
}
