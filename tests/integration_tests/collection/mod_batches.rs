use keradb::{Database, DbError, doc};

use crate::integration_tests::support::FlakyStore;

fn seed() -> Vec<keradb::Document> {
    (0..4).map(|i| doc! {"i": i}).collect()
}

#[test]
fn update_many_stops_and_keeps_earlier_writes() {
    let db = Database::with_store(FlakyStore::seeded("c", &seed(), 2));
    let c = db.collection("c");
    match c.update_many(doc! {}, doc! {"$set": {"done": true}}).unwrap_err() {
        DbError::PartialBatch { operation, index, completed, source } => {
            assert_eq!(operation, "update_many");
            assert_eq!((index, completed), (2, 2));
            assert!(matches!(*source, DbError::Store(_)));
        }
        other => panic!("unexpected {other}"),
    }
    // no rollback
    assert_eq!(c.count(doc! {"done": true}).unwrap(), 2);
}

#[test]
fn delete_many_reports_completed_deletes() {
    let db = Database::with_store(FlakyStore::seeded("c", &seed(), 1));
    let c = db.collection("c");
    match c.delete_many(doc! {"i": {"$gte": 1}}).unwrap_err() {
        DbError::PartialBatch { operation, index, completed, .. } => {
            assert_eq!(operation, "delete_many");
            assert_eq!((index, completed), (1, 1));
        }
        other => panic!("unexpected {other}"),
    }
    assert_eq!(c.count(doc! {}).unwrap(), 3);
}

#[test]
fn single_operations_surface_store_errors_directly() {
    let db = Database::with_store(FlakyStore::seeded("c", &seed(), 0));
    let c = db.collection("c");
    assert!(matches!(c.update_one(doc! {"i": 0}, doc! {"$set": {"x": 1}}), Err(DbError::Store(_))));
    assert!(matches!(c.delete_one(doc! {"i": 0}), Err(DbError::Store(_))));
    assert!(matches!(c.insert_document(&doc! {}), Err(DbError::Store(_))));
}
