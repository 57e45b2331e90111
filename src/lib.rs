//! keradb: MongoDB-style filters and update operators evaluated in-process over a
//! pluggable document store.
//!
//! ```
//! use keradb::{Database, doc};
//!
//! let db = Database::in_memory();
//! let users = db.collection("users");
//! users.insert_document(&doc! {"name": "Alice", "age": 30}).unwrap();
//! users.update_many(doc! {"age": {"$gte": 26}}, doc! {"$inc": {"age": 1}}).unwrap();
//! assert_eq!(users.count(doc! {"age": 31}).unwrap(), 1);
//! ```
pub mod collection;
pub mod config;
pub mod document;
pub mod errors;
pub mod query;
pub mod store;
pub mod types;
pub mod utils;

#[doc(hidden)]
pub use log as __log;
#[doc(hidden)]
pub use serde_json as __json;

pub use crate::collection::Collection;
pub use crate::config::DbConfig;
pub use crate::document::{Document, Value};
pub use crate::errors::DbError;
pub use crate::types::DocumentId;

use crate::store::{DocumentStore, MemoryStore, SharedStore};
use std::path::Path;

/// Entry point: owns the shared store and hands out collection handles.
#[derive(Clone)]
pub struct Database {
    store: SharedStore,
}

impl Database {
    /// Opens a database as described by `config`, installing its logging first.
    ///
    /// # Errors
    /// Logging setup failures, or failures loading the snapshot.
    pub fn open(config: &DbConfig) -> Result<Self, DbError> {
        config.init_logging()?;
        let store = match &config.snapshot_path {
            Some(path) => MemoryStore::open(path)?,
            None => MemoryStore::new(),
        };
        log::info!("database opened (snapshot: {:?})", config.snapshot_path);
        Ok(Self::with_store(store))
    }

    /// Opens a snapshot-backed database without touching logging.
    ///
    /// # Errors
    /// Failures loading the snapshot.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        Ok(Self::with_store(MemoryStore::open(path)?))
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store<S: DocumentStore + 'static>(backend: S) -> Self {
        Self { store: store::shared(backend) }
    }

    #[must_use]
    pub const fn from_shared(store: SharedStore) -> Self {
        Self { store }
    }

    /// A handle on `name`; the collection exists once something is inserted into it.
    pub fn collection(&self, name: &str) -> Collection {
        Collection::new(name, self.store.clone())
    }

    /// # Errors
    /// Propagates store failures.
    pub fn list_collection_names(&self) -> Result<Vec<String>, DbError> {
        Ok(self.list_collections()?.into_iter().map(|(name, _)| name).collect())
    }

    /// Every collection with its document count.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn list_collections(&self) -> Result<Vec<(String, u64)>, DbError> {
        self.store.read().list_collections()
    }

    /// # Errors
    /// Propagates store failures, e.g. a snapshot that cannot be written.
    pub fn flush(&self) -> Result<(), DbError> {
        self.store.write().flush()
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

/// Resolves [`DbConfig`] from files and environment and installs logging from it.
///
/// # Errors
/// Configuration or logging setup failures.
pub fn init() -> Result<DbConfig, DbError> {
    let cfg = DbConfig::load(None)?;
    cfg.init_logging()?;
    Ok(cfg)
}
