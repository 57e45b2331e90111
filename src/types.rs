use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reserved field holding a document's identity.
pub const ID_FIELD: &str = "_id";

/// Sigil marking operator keys in filter and update expressions.
pub const OPERATOR_SIGIL: char = '$';

/// A document identity: an opaque string assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    /// A fresh random identity (UUID v4, hyphenated).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// True when `key` is written as an operator (`$set`, `$and`, ...).
#[must_use]
pub fn is_operator_key(key: &str) -> bool {
    key.starts_with(OPERATOR_SIGIL)
}
