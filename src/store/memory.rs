use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::DocumentStore;
use crate::document::{Document, Value};
use crate::errors::DbError;
use crate::types::{DocumentId, ID_FIELD};

/// Rows of one collection, kept as encoded JSON so every read decodes across the boundary.
#[derive(Debug, Default)]
struct Rows {
    next_seq: u64,
    // insertion sequence -> (id, encoded document); drives scan order
    by_seq: BTreeMap<u64, (DocumentId, Vec<u8>)>,
    seq_of: HashMap<DocumentId, u64>,
}

impl Rows {
    fn insert(&mut self, id: DocumentId, bytes: Vec<u8>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.seq_of.insert(id.clone(), seq);
        self.by_seq.insert(seq, (id, bytes));
    }

    fn get(&self, id: &DocumentId) -> Option<&[u8]> {
        let seq = self.seq_of.get(id)?;
        self.by_seq.get(seq).map(|(_, b)| b.as_slice())
    }

    fn replace(&mut self, id: &DocumentId, bytes: Vec<u8>) -> bool {
        match self.seq_of.get(id).and_then(|seq| self.by_seq.get_mut(seq)) {
            Some(slot) => {
                slot.1 = bytes;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &DocumentId) -> bool {
        match self.seq_of.remove(id) {
            Some(seq) => self.by_seq.remove(&seq).is_some(),
            None => false,
        }
    }

    fn len(&self) -> u64 {
        self.by_seq.len() as u64
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    collections: IndexMap<String, Vec<Document>>,
}

/// In-process reference store.
///
/// Documents are held as encoded JSON per collection and scanned in insertion order. When
/// opened on a path, `flush` writes a JSON snapshot there atomically and `open` reloads it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, Rows>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// A store with no backing file; `flush` is a no-op.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a store backed by a snapshot file, loading it when it exists.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or an encoding error if it is not a
    /// valid snapshot.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let path = path.as_ref().to_path_buf();
        let mut store = Self { collections: BTreeMap::new(), snapshot_path: Some(path.clone()) };
        if path.exists() {
            let bytes = std::fs::read(&path)?;
            if !bytes.is_empty() {
                let snap: Snapshot = serde_json::from_slice(&bytes)?;
                for (name, docs) in snap.collections {
                    let rows = store.collections.entry(name.clone()).or_default();
                    for doc in docs {
                        let id = doc.id().ok_or_else(|| {
                            DbError::InvalidDocumentId(format!("snapshot document without _id in {}", path.display()))
                        })?;
                        if rows.seq_of.contains_key(&id) {
                            return Err(DbError::DuplicateId(format!("{name}/{id} in snapshot {}", path.display())));
                        }
                        rows.insert(id, serde_json::to_vec(&doc)?);
                    }
                }
            }
            log::info!("loaded snapshot {} ({} collections)", path.display(), store.collections.len());
        }
        Ok(store)
    }

    #[must_use]
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    fn decode(bytes: &[u8]) -> Result<Document, DbError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode_with_id(id: &DocumentId, document: &Document) -> Result<Vec<u8>, DbError> {
        let mut stored = document.clone();
        stored.set_id(id);
        Ok(serde_json::to_vec(&stored)?)
    }

    fn write_snapshot(&self, path: &Path) -> Result<(), DbError> {
        let mut snap = Snapshot::default();
        for (name, rows) in &self.collections {
            let docs = rows.by_seq.values().map(|(_, b)| Self::decode(b)).collect::<Result<Vec<_>, _>>()?;
            snap.collections.insert(name.clone(), docs);
        }
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer(&mut tmp, &snap)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| DbError::Io(e.error.to_string()))?;
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn put(&mut self, collection: &str, document: &Document) -> Result<DocumentId, DbError> {
        let id = match document.get(ID_FIELD) {
            None | Some(Value::Null) => DocumentId::new(),
            Some(Value::String(s)) => DocumentId(s.clone()),
            Some(other) => {
                return Err(DbError::InvalidDocumentId(format!("_id must be a string, got {}", other.kind())));
            }
        };
        let rows = self.collections.entry(collection.to_owned()).or_default();
        if rows.seq_of.contains_key(&id) {
            return Err(DbError::DuplicateId(format!("{collection}/{id}")));
        }
        rows.insert(id.clone(), Self::encode_with_id(&id, document)?);
        Ok(id)
    }

    fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>, DbError> {
        self.collections
            .get(collection)
            .and_then(|rows| rows.get(id))
            .map(Self::decode)
            .transpose()
    }

    fn put_at(&mut self, collection: &str, id: &DocumentId, document: &Document) -> Result<(), DbError> {
        let bytes = Self::encode_with_id(id, document)?;
        let replaced = self.collections.get_mut(collection).is_some_and(|rows| rows.replace(id, bytes));
        if replaced { Ok(()) } else { Err(DbError::NoSuchDocument(format!("{collection}/{id}"))) }
    }

    fn delete(&mut self, collection: &str, id: &DocumentId) -> Result<u64, DbError> {
        Ok(self.collections.get_mut(collection).map_or(0, |rows| u64::from(rows.remove(id))))
    }

    fn scan_all(&self, collection: &str) -> Result<Vec<Document>, DbError> {
        self.collections.get(collection).map_or_else(
            || Ok(Vec::new()),
            |rows| rows.by_seq.values().map(|(_, b)| Self::decode(b)).collect(),
        )
    }

    fn count(&self, collection: &str) -> Result<u64, DbError> {
        Ok(self.collections.get(collection).map_or(0, Rows::len))
    }

    fn list_collections(&self) -> Result<Vec<(String, u64)>, DbError> {
        Ok(self.collections.iter().map(|(name, rows)| (name.clone(), rows.len())).collect())
    }

    fn flush(&mut self) -> Result<(), DbError> {
        let Some(path) = self.snapshot_path.clone() else { return Ok(()) };
        self.write_snapshot(&path).inspect_err(|e| log::error!("snapshot flush to {} failed: {e}", path.display()))?;
        log::debug!("flushed snapshot {}", path.display());
        Ok(())
    }
}
