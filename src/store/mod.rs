//! The storage boundary. The query layer only ever talks to a store through
//! [`DocumentStore`]; durability, indexing and layout belong to the implementation.
mod memory;

pub use memory::MemoryStore;

use crate::document::Document;
use crate::errors::DbError;
use crate::types::DocumentId;
use parking_lot::RwLock;
use std::sync::Arc;

/// Point and bulk operations a document store must offer.
///
/// Every call is one blocking round-trip. Nothing ties consecutive calls together: a
/// read followed by a write can interleave with other writers.
pub trait DocumentStore: Send + Sync {
    /// Persists a new document and returns its identity.
    fn put(&mut self, collection: &str, document: &Document) -> Result<DocumentId, DbError>;

    fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>, DbError>;

    /// Overwrites the document stored under `id`. `document` carries no `_id`.
    fn put_at(&mut self, collection: &str, id: &DocumentId, document: &Document) -> Result<(), DbError>;

    /// Removes the document under `id`, returning how many were removed (0 or 1).
    fn delete(&mut self, collection: &str, id: &DocumentId) -> Result<u64, DbError>;

    /// Materializes every document of the collection, unfiltered and unindexed.
    fn scan_all(&self, collection: &str) -> Result<Vec<Document>, DbError>;

    fn count(&self, collection: &str) -> Result<u64, DbError>;

    /// Every collection with its document count.
    fn list_collections(&self) -> Result<Vec<(String, u64)>, DbError>;

    /// Durability barrier.
    fn flush(&mut self) -> Result<(), DbError>;
}

/// Shared handle to a store; each round-trip takes the lock for that call only.
pub type SharedStore = Arc<RwLock<Box<dyn DocumentStore>>>;

/// Wraps a store for sharing between collections.
pub fn shared<S: DocumentStore + 'static>(store: S) -> SharedStore {
    Arc::new(RwLock::new(Box::new(store)))
}
