use std::time::Instant;

use crate::document::Document;
use crate::errors::DbError;
use crate::store::SharedStore;
use crate::types::DocumentId;
use crate::utils::devlog;

use super::cursor::{Cursor, SingleResult};
use super::eval::eval_filter;
use super::types::{DeleteReport, Filter, InsertManyResult, InsertOneResult, UpdateDoc, UpdateReport};
use super::update::apply_update;

const LOG_TARGET: &str = crate::utils::logger::QUERY_TARGET;

/// Documents of `collection` that satisfy `filter`, in store order.
///
/// `{"_id": "<string>"}` is answered by one point lookup; anything else scans the whole
/// collection and evaluates each document here.
fn fetch_matching(store: &SharedStore, collection: &str, filter: &Filter) -> Result<(Vec<Document>, bool), DbError> {
    if let Some(id) = filter.as_id_lookup() {
        log::debug!(target: LOG_TARGET, "key lookup {collection}/{id}");
        let doc = store.read().get(collection, &DocumentId::from(id))?;
        return Ok((doc.into_iter().collect(), true));
    }
    let all = store.read().scan_all(collection)?;
    log::debug!(target: LOG_TARGET, "scan {collection} ({} docs) with {} filter", all.len(), filter.type_name());
    Ok((all.into_iter().filter(|d| eval_filter(d, filter)).collect(), false))
}

/// # Errors
/// Propagates store and encoding failures.
pub fn insert_one(store: &SharedStore, collection: &str, document: &Document) -> Result<InsertOneResult, DbError> {
    let inserted_id = store.write().put(collection, document)?;
    log::debug!(target: LOG_TARGET, "inserted {collection}/{inserted_id}");
    Ok(InsertOneResult { inserted_id })
}

/// Inserts documents one at a time in order.
///
/// # Errors
/// `DbError::PartialBatch` naming the first failed index; documents before it stay inserted.
pub fn insert_many(store: &SharedStore, collection: &str, documents: &[Document]) -> Result<InsertManyResult, DbError> {
    let start = Instant::now();
    let mut inserted_ids = Vec::with_capacity(documents.len());
    for (index, doc) in documents.iter().enumerate() {
        match insert_one(store, collection, doc) {
            Ok(r) => inserted_ids.push(r.inserted_id),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "insert_many into {collection} stopped at {index}: {e}");
                return Err(DbError::PartialBatch {
                    operation: "insert_many",
                    index,
                    completed: inserted_ids.len() as u64,
                    source: Box::new(e),
                });
            }
        }
    }
    devlog::bench("insert_many", collection, start, &[("inserted", inserted_ids.len().into())]);
    Ok(InsertManyResult { inserted_ids })
}

/// First document matching `filter`, or a not-found result.
///
/// # Errors
/// Propagates store and encoding failures.
pub fn find_one(store: &SharedStore, collection: &str, filter: &Filter) -> Result<SingleResult, DbError> {
    if let Some(id) = filter.as_id_lookup() {
        log::debug!(target: LOG_TARGET, "key lookup {collection}/{id}");
        return Ok(SingleResult::new(store.read().get(collection, &DocumentId::from(id))?));
    }
    let all = store.read().scan_all(collection)?;
    Ok(SingleResult::new(all.into_iter().find(|d| eval_filter(d, filter))))
}

/// # Errors
/// Propagates store and encoding failures.
pub fn find_docs(store: &SharedStore, collection: &str, filter: &Filter) -> Result<Cursor, DbError> {
    let start = Instant::now();
    let (docs, used_key) = fetch_matching(store, collection, filter)?;
    devlog::bench("find", collection, start, &[("used_key", used_key.into()), ("result_count", docs.len().into())]);
    Ok(Cursor::new(docs))
}

/// Number of matching documents. An empty filter asks the store directly.
///
/// # Errors
/// Propagates store and encoding failures.
pub fn count_docs(store: &SharedStore, collection: &str, filter: &Filter) -> Result<u64, DbError> {
    let start = Instant::now();
    let n = if filter.is_empty() {
        store.read().count(collection)?
    } else {
        let (docs, _) = fetch_matching(store, collection, filter)?;
        docs.len() as u64
    };
    devlog::bench("count", collection, start, &[("result_count", n.into())]);
    Ok(n)
}

/// Updates the first matching document. No match is a zero report, not an error.
///
/// # Errors
/// Propagates store and encoding failures, or `InvalidDocumentId` if the stored document
/// has no usable identity.
pub fn update_one(store: &SharedStore, collection: &str, filter: &Filter, update: &UpdateDoc) -> Result<UpdateReport, DbError> {
    let Some(doc) = find_one(store, collection, filter)?.into_document() else {
        return Ok(UpdateReport::default());
    };
    let id = stored_id(collection, &doc)?;
    let next = apply_update(&doc, update).without_id();
    store.write().put_at(collection, &id, &next)?;
    Ok(UpdateReport { matched: 1, modified: 1 })
}

/// Updates every matching document, one identity at a time.
///
/// # Errors
/// `DbError::PartialBatch` when an individual update fails; earlier updates stay applied.
pub fn update_many(store: &SharedStore, collection: &str, filter: &Filter, update: &UpdateDoc) -> Result<UpdateReport, DbError> {
    let start = Instant::now();
    let (matched_docs, _) = fetch_matching(store, collection, filter)?;
    let matched = matched_docs.len() as u64;
    let mut modified = 0u64;
    for (index, doc) in matched_docs.iter().enumerate() {
        let step = stored_id(collection, doc).and_then(|id| update_one(store, collection, &Filter::by_id(&id), update));
        match step {
            Ok(r) => modified += r.modified,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "update_many on {collection} stopped at {index}: {e}");
                return Err(DbError::PartialBatch { operation: "update_many", index, completed: modified, source: Box::new(e) });
            }
        }
    }
    devlog::bench("update_many", collection, start, &[("matched", matched.into()), ("modified", modified.into())]);
    Ok(UpdateReport { matched, modified })
}

/// Deletes the first matching document.
///
/// # Errors
/// Propagates store and encoding failures.
pub fn delete_one(store: &SharedStore, collection: &str, filter: &Filter) -> Result<DeleteReport, DbError> {
    let Some(doc) = find_one(store, collection, filter)?.into_document() else {
        return Ok(DeleteReport::default());
    };
    let id = stored_id(collection, &doc)?;
    let deleted = store.write().delete(collection, &id)?;
    Ok(DeleteReport { deleted })
}

/// Deletes every matching document, one identity at a time.
///
/// # Errors
/// `DbError::PartialBatch` when an individual delete fails; earlier deletes stay applied.
pub fn delete_many(store: &SharedStore, collection: &str, filter: &Filter) -> Result<DeleteReport, DbError> {
    let start = Instant::now();
    let (matched_docs, _) = fetch_matching(store, collection, filter)?;
    let mut deleted = 0u64;
    for (index, doc) in matched_docs.iter().enumerate() {
        let step = stored_id(collection, doc).and_then(|id| delete_one(store, collection, &Filter::by_id(&id)));
        match step {
            Ok(r) => deleted += r.deleted,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "delete_many on {collection} stopped at {index}: {e}");
                return Err(DbError::PartialBatch { operation: "delete_many", index, completed: deleted, source: Box::new(e) });
            }
        }
    }
    devlog::bench("delete_many", collection, start, &[("matched", matched_docs.len().into()), ("deleted", deleted.into())]);
    Ok(DeleteReport { deleted })
}

/// Removes every document of the collection.
///
/// # Errors
/// Same as [`delete_many`].
pub fn drop(store: &SharedStore, collection: &str) -> Result<DeleteReport, DbError> {
    delete_many(store, collection, &Filter::default())
}

fn stored_id(collection: &str, doc: &Document) -> Result<DocumentId, DbError> {
    doc.id().ok_or_else(|| DbError::InvalidDocumentId(format!("document in {collection} has no string _id")))
}
