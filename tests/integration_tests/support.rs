//! Store wrappers used to observe and break the store boundary.
use keradb::store::{DocumentStore, MemoryStore};
use keradb::{DbError, Document, DocumentId};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct Calls {
    pub get: AtomicUsize,
    pub scan_all: AtomicUsize,
    pub count: AtomicUsize,
}

impl Calls {
    pub fn get(&self) -> usize {
        self.get.load(Ordering::SeqCst)
    }

    pub fn scans(&self) -> usize {
        self.scan_all.load(Ordering::SeqCst)
    }

    pub fn counts(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// Counts read round-trips.
pub struct CountingStore {
    inner: MemoryStore,
    pub calls: Arc<Calls>,
}

impl CountingStore {
    pub fn new() -> (Self, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        (Self { inner: MemoryStore::new(), calls: calls.clone() }, calls)
    }
}

impl DocumentStore for CountingStore {
    fn put(&mut self, collection: &str, document: &Document) -> Result<DocumentId, DbError> {
        self.inner.put(collection, document)
    }

    fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>, DbError> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.inner.get(collection, id)
    }

    fn put_at(&mut self, collection: &str, id: &DocumentId, document: &Document) -> Result<(), DbError> {
        self.inner.put_at(collection, id, document)
    }

    fn delete(&mut self, collection: &str, id: &DocumentId) -> Result<u64, DbError> {
        self.inner.delete(collection, id)
    }

    fn scan_all(&self, collection: &str) -> Result<Vec<Document>, DbError> {
        self.calls.scan_all.fetch_add(1, Ordering::SeqCst);
        self.inner.scan_all(collection)
    }

    fn count(&self, collection: &str) -> Result<u64, DbError> {
        self.calls.count.fetch_add(1, Ordering::SeqCst);
        self.inner.count(collection)
    }

    fn list_collections(&self) -> Result<Vec<(String, u64)>, DbError> {
        self.inner.list_collections()
    }

    fn flush(&mut self) -> Result<(), DbError> {
        self.inner.flush()
    }
}

/// Fails every write after the first `allowed` successful ones.
pub struct FlakyStore {
    inner: MemoryStore,
    allowed: usize,
    writes: usize,
}

impl FlakyStore {
    /// Seeds `docs` into `collection`, then allows `allowed` further writes.
    pub fn seeded(collection: &str, docs: &[Document], allowed: usize) -> Self {
        let mut inner = MemoryStore::new();
        for d in docs {
            inner.put(collection, d).unwrap();
        }
        Self { inner, allowed, writes: 0 }
    }

    fn gate(&mut self) -> Result<(), DbError> {
        if self.writes >= self.allowed {
            return Err(DbError::Store("injected write failure".into()));
        }
        self.writes += 1;
        Ok(())
    }
}

impl DocumentStore for FlakyStore {
    fn put(&mut self, collection: &str, document: &Document) -> Result<DocumentId, DbError> {
        self.gate()?;
        self.inner.put(collection, document)
    }

    fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>, DbError> {
        self.inner.get(collection, id)
    }

    fn put_at(&mut self, collection: &str, id: &DocumentId, document: &Document) -> Result<(), DbError> {
        self.gate()?;
        self.inner.put_at(collection, id, document)
    }

    fn delete(&mut self, collection: &str, id: &DocumentId) -> Result<u64, DbError> {
        self.gate()?;
        self.inner.delete(collection, id)
    }

    fn scan_all(&self, collection: &str) -> Result<Vec<Document>, DbError> {
        self.inner.scan_all(collection)
    }

    fn count(&self, collection: &str) -> Result<u64, DbError> {
        self.inner.count(collection)
    }

    fn list_collections(&self) -> Result<Vec<(String, u64)>, DbError> {
        self.inner.list_collections()
    }

    fn flush(&mut self) -> Result<(), DbError> {
        Ok(())
    }
}
