use serde::Serialize;

use super::core::Collection;
use crate::document::Document;
use crate::errors::DbError;
use crate::query::{
    self, Cursor, DeleteReport, Filter, InsertManyResult, InsertOneResult, SingleResult, UpdateDoc, UpdateReport,
};

impl Collection {
    /// Encodes `value` as a document and stores it.
    ///
    /// # Errors
    /// An encoding error if `value` does not serialize to a mapping, or a store failure.
    pub fn insert_one<T: Serialize + ?Sized>(&self, value: &T) -> Result<InsertOneResult, DbError> {
        let doc = Document::from_serialize(value)?;
        self.insert_document(&doc)
    }

    /// # Errors
    /// Propagates store failures.
    pub fn insert_document(&self, document: &Document) -> Result<InsertOneResult, DbError> {
        query::insert_one(&self.store, self.name(), document)
    }

    /// Encodes every value first, then inserts them in order.
    ///
    /// # Errors
    /// An encoding error before anything is written, or `DbError::PartialBatch` when an
    /// insert fails part way.
    pub fn insert_many<T: Serialize>(&self, values: &[T]) -> Result<InsertManyResult, DbError> {
        let docs = values.iter().map(Document::from_serialize).collect::<Result<Vec<_>, _>>()?;
        query::insert_many(&self.store, self.name(), &docs)
    }

    /// # Errors
    /// Propagates store and encoding failures.
    pub fn find_one(&self, filter: impl Into<Filter>) -> Result<SingleResult, DbError> {
        query::find_one(&self.store, self.name(), &filter.into())
    }

    /// # Errors
    /// Propagates store and encoding failures.
    pub fn find(&self, filter: impl Into<Filter>) -> Result<Cursor, DbError> {
        query::find_docs(&self.store, self.name(), &filter.into())
    }

    /// # Errors
    /// Propagates store and encoding failures.
    pub fn update_one(&self, filter: impl Into<Filter>, update: impl Into<UpdateDoc>) -> Result<UpdateReport, DbError> {
        query::update_one(&self.store, self.name(), &filter.into(), &update.into())
    }

    /// # Errors
    /// `DbError::PartialBatch` if an individual update fails.
    pub fn update_many(&self, filter: impl Into<Filter>, update: impl Into<UpdateDoc>) -> Result<UpdateReport, DbError> {
        query::update_many(&self.store, self.name(), &filter.into(), &update.into())
    }

    /// # Errors
    /// Propagates store and encoding failures.
    pub fn delete_one(&self, filter: impl Into<Filter>) -> Result<DeleteReport, DbError> {
        query::delete_one(&self.store, self.name(), &filter.into())
    }

    /// # Errors
    /// `DbError::PartialBatch` if an individual delete fails.
    pub fn delete_many(&self, filter: impl Into<Filter>) -> Result<DeleteReport, DbError> {
        query::delete_many(&self.store, self.name(), &filter.into())
    }

    /// # Errors
    /// Propagates store and encoding failures.
    pub fn count(&self, filter: impl Into<Filter>) -> Result<u64, DbError> {
        query::count_docs(&self.store, self.name(), &filter.into())
    }

    /// Deletes every document in the collection.
    ///
    /// # Errors
    /// `DbError::PartialBatch` if an individual delete fails.
    pub fn drop(&self) -> Result<DeleteReport, DbError> {
        query::drop(&self.store, self.name())
    }
}
