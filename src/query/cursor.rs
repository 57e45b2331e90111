use serde::de::DeserializeOwned;

use crate::document::Document;
use crate::errors::DbError;

/// A paginated view over an already fetched, already filtered result sequence.
///
/// `skip` and `limit` are configuration, not one-shot: every read recomputes the window
/// from the full sequence. The step position (`advance`/`decode`) is an index into
/// whatever window is current, so changing `skip`/`limit` mid-iteration keeps the index
/// and re-targets it at the new window.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    docs: Vec<Document>,
    skip: usize,
    limit: Option<usize>,
    // None until the first advance
    pos: Option<usize>,
}

impl Cursor {
    #[must_use]
    pub const fn new(docs: Vec<Document>) -> Self {
        Self { docs, skip: 0, limit: None, pos: None }
    }

    /// Caps the window at `n` documents. `limit(0)` yields an empty window.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Starts the window `n` documents into the sequence.
    pub fn skip(&mut self, n: usize) -> &mut Self {
        self.skip = n;
        self
    }

    fn window(&self) -> &[Document] {
        let start = self.skip.min(self.docs.len());
        let rest = &self.docs[start..];
        let len = self.limit.map_or(rest.len(), |l| l.min(rest.len()));
        &rest[..len]
    }

    /// Copies out the current window.
    #[must_use]
    pub fn all(&self) -> Vec<Document> {
        self.window().to_vec()
    }

    /// Number of documents in the current window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window().is_empty()
    }

    /// Moves to the next document of the window; false once the window is exhausted.
    pub fn advance(&mut self) -> bool {
        let next = self.pos.map_or(0, |p| p.saturating_add(1));
        self.pos = Some(next);
        next < self.window().len()
    }

    /// The document at the current position, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Document> {
        self.pos.and_then(|p| self.window().get(p))
    }

    /// Decodes the current document.
    ///
    /// # Errors
    /// `DbError::NoSuchDocument` when there is no current document (before the first
    /// `advance`, or past the end), or an encoding error if it does not fit `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DbError> {
        self.current()
            .ok_or_else(|| DbError::NoSuchDocument("cursor has no current document".into()))?
            .decode()
    }

    /// Resets the step position to before the first document.
    pub fn rewind(&mut self) {
        self.pos = None;
    }

    /// Consumes the cursor, returning the current window.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<Document> {
        let start = self.skip.min(self.docs.len());
        let mut docs = self.docs.split_off(start);
        if let Some(l) = self.limit {
            docs.truncate(l);
        }
        docs
    }
}

/// Yields the window elements after the current position.
impl IntoIterator for Cursor {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        let seen = self.pos.map_or(0, |p| p.saturating_add(1));
        let mut docs = self.into_vec();
        docs.drain(..seen.min(docs.len()));
        docs.into_iter()
    }
}

/// The outcome of a single-document lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleResult {
    doc: Option<Document>,
}

impl SingleResult {
    #[must_use]
    pub const fn new(doc: Option<Document>) -> Self {
        Self { doc }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.doc.is_some()
    }

    #[must_use]
    pub const fn document(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    #[must_use]
    pub fn into_document(self) -> Option<Document> {
        self.doc
    }

    /// # Errors
    /// `DbError::NoSuchDocument` when nothing matched, or an encoding error if the document
    /// does not fit `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DbError> {
        self.doc
            .as_ref()
            .ok_or_else(|| DbError::NoSuchDocument("no document matched the filter".into()))?
            .decode()
    }
}
