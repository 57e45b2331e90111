use keradb::query::Filter;
use keradb::{Database, doc};

use crate::integration_tests::support::CountingStore;

#[test]
fn id_equality_uses_point_lookup() {
    let (store, calls) = CountingStore::new();
    let db = Database::with_store(store);
    let c = db.collection("users");
    let id = c.insert_document(&doc! {"name": "Alice"}).unwrap().inserted_id;

    let hit = c.find_one(doc! {"_id": id.as_str()}).unwrap();
    assert!(hit.is_found());
    assert_eq!(c.find(Filter::by_id(&id)).unwrap().len(), 1);
    assert_eq!(calls.get(), 2);
    assert_eq!(calls.scans(), 0);

    assert!(c.find(doc! {"_id": "missing"}).unwrap().is_empty());
    assert_eq!(calls.scans(), 0);
}

#[test]
fn anything_else_scans() {
    let (store, calls) = CountingStore::new();
    let db = Database::with_store(store);
    let c = db.collection("users");
    let id = c.insert_document(&doc! {"name": "Alice"}).unwrap().inserted_id;

    // an extra clause or operator form disables the lookup
    assert_eq!(c.find(doc! {"_id": id.as_str(), "name": "Alice"}).unwrap().len(), 1);
    assert_eq!(c.find(doc! {"_id": {"$eq": id.as_str()}}).unwrap().len(), 1);
    assert_eq!(c.find(doc! {"name": "Alice"}).unwrap().len(), 1);
    assert_eq!(calls.scans(), 3);
    assert_eq!(calls.get(), 0);
}

#[test]
fn empty_filter_count_asks_the_store() {
    let (store, calls) = CountingStore::new();
    let db = Database::with_store(store);
    let c = db.collection("users");
    c.insert_many(&[doc! {"a": 1}, doc! {"a": 2}]).unwrap();
    assert_eq!(c.count(doc! {}).unwrap(), 2);
    assert_eq!((calls.counts(), calls.scans()), (1, 0));
    assert_eq!(c.count(doc! {"a": 2}).unwrap(), 1);
    assert_eq!((calls.counts(), calls.scans()), (1, 1));
}
