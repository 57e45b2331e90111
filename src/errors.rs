use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Document not found: {0}")]
    NoSuchDocument(String),

    #[error("Invalid document ID: {0}")]
    InvalidDocumentId(String),

    #[error("Duplicate document ID: {0}")]
    DuplicateId(String),

    #[error("Config error: {0}")]
    Config(String),

    /// A multi-document operation stopped at `index`; the `completed` operations before it
    /// stay applied.
    #[error("{operation} failed at index {index} after {completed} completed: {source}")]
    PartialBatch {
        operation: &'static str,
        index: usize,
        completed: u64,
        #[source]
        source: Box<DbError>,
    },
}

impl DbError {
    /// True for the not-found class (nothing to decode or look up).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NoSuchDocument(_))
    }

    /// True for failures serializing or deserializing documents.
    #[must_use]
    pub const fn is_encoding(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Encoding(_))
    }
}

impl From<std::io::Error> for DbError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<toml::de::Error> for DbError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
