use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::errors::DbError;
use crate::types::{DocumentId, ID_FIELD};

/// A stored record: a field-name to [`Value`] mapping plus the reserved `_id` field.
///
/// Fields keep insertion order so expressions built from literals keep their declared
/// order. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(IndexMap<String, Value>);

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// The document's identity, when `_id` holds a string.
    #[must_use]
    pub fn id(&self) -> Option<DocumentId> {
        match self.0.get(ID_FIELD) {
            Some(Value::String(s)) => Some(DocumentId(s.clone())),
            _ => None,
        }
    }

    /// Places `_id` first, replacing any previous identity.
    pub fn set_id(&mut self, id: &DocumentId) {
        self.0.shift_insert(0, ID_FIELD.to_owned(), Value::String(id.0.clone()));
    }

    /// A copy without the `_id` field, as sent back to the store on update.
    #[must_use]
    pub fn without_id(&self) -> Self {
        let mut out = self.clone();
        out.remove(ID_FIELD);
        out
    }

    /// Encodes any serializable value as a document.
    ///
    /// # Errors
    /// Returns an encoding error if `value` fails to serialize or is not a mapping.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, DbError> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(m) => Ok(Self::from(m)),
            other => Err(DbError::Encoding(format!(
                "document must encode to an object, got {}",
                Value::from(other).kind()
            ))),
        }
    }

    /// Decodes the document into a caller-provided type.
    ///
    /// # Errors
    /// Returns an encoding error if the document does not fit `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DbError> {
        let json = serde_json::Value::Object(self.clone().into());
        Ok(serde_json::from_value(json)?)
    }

    /// Parses JSON text whose top level is an object.
    ///
    /// # Errors
    /// Returns an encoding error on invalid JSON or a non-object top level.
    pub fn from_json_str(json: &str) -> Result<Self, DbError> {
        match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Object(m) => Ok(Self::from(m)),
            other => Err(DbError::Encoding(format!(
                "expected a JSON object, got {}",
                Value::from(other).kind()
            ))),
        }
    }

    /// Renders the document as compact JSON text.
    ///
    /// # Errors
    /// Returns an encoding error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, DbError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Document {
    fn from(m: serde_json::Map<String, serde_json::Value>) -> Self {
        m.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}

impl From<Document> for serde_json::Map<String, serde_json::Value> {
    fn from(d: Document) -> Self {
        d.0.into_iter().map(|(k, v)| (k, serde_json::Value::from(v))).collect()
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds a [`Document`] from a JSON object literal, keeping field order.
///
/// ```
/// let d = keradb::doc! {"name": "Alice", "age": 30};
/// assert_eq!(d.get("age"), Some(&keradb::document::Value::Int(30)));
/// ```
#[macro_export]
macro_rules! doc {
    ($($body:tt)*) => {
        match $crate::__json::json!({ $($body)* }) {
            $crate::__json::Value::Object(m) => $crate::document::Document::from(m),
            _ => unreachable!("object literal"),
        }
    };
}
