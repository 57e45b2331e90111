use keradb::query::Filter;
use keradb::{Database, Value, doc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Person {
    name: String,
    age: i64,
}

#[test]
fn alice_and_bob_end_to_end() {
    let db = Database::in_memory();
    let people = db.collection("people");
    let ids = people
        .insert_many(&[Person { name: "Alice".into(), age: 30 }, Person { name: "Bob".into(), age: 25 }])
        .unwrap()
        .inserted_ids;
    assert_eq!(ids.len(), 2);

    let older = people.find(doc! {"age": {"$gte": 26}}).unwrap().all();
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].get("name"), Some(&Value::from("Alice")));
    assert_eq!(older[0].id(), Some(ids[0].clone()));

    let r = people.update_one(doc! {"name": "Bob"}, doc! {"$inc": {"age": 5}}).unwrap();
    assert_eq!((r.matched, r.modified), (1, 1));
    let bob: Person = people.find_one(doc! {"name": "Bob"}).unwrap().decode().unwrap();
    assert_eq!(bob, Person { name: "Bob".into(), age: 30 });

    assert_eq!(people.delete_many(doc! {}).unwrap().deleted, 2);
    assert_eq!(people.count(doc! {}).unwrap(), 0);
}

#[test]
fn misses_are_reports_not_errors() {
    let db = Database::in_memory();
    let c = db.collection("empty");
    assert!(!c.find_one(doc! {"x": 1}).unwrap().is_found());
    assert!(c.find_one(doc! {"x": 1}).unwrap().decode::<Person>().unwrap_err().is_not_found());
    assert_eq!(c.update_one(doc! {"x": 1}, doc! {"$set": {"y": 2}}).unwrap().matched, 0);
    assert_eq!(c.update_many(doc! {"x": 1}, doc! {"$set": {"y": 2}}).unwrap().matched, 0);
    assert_eq!(c.delete_one(doc! {"x": 1}).unwrap().deleted, 0);
    assert_eq!(c.drop().unwrap().deleted, 0);
}

#[test]
fn replacement_update_keeps_identity_only() {
    let db = Database::in_memory();
    let c = db.collection("things");
    let id = c.insert_document(&doc! {"a": 0, "keep": "no"}).unwrap().inserted_id;
    c.update_one(Filter::by_id(&id), doc! {"$set": {"a": 1}, "b": 2}).unwrap();
    let after = c.find_one(Filter::by_id(&id)).unwrap().into_document().unwrap();
    assert_eq!(after, doc! {"_id": id.as_str(), "b": 2});
}

#[test]
fn update_many_applies_to_each_match() {
    let db = Database::in_memory();
    let c = db.collection("scores");
    for n in 0..5 {
        c.insert_document(&doc! {"n": n, "tags": []}).unwrap();
    }
    let r = c.update_many(doc! {"n": {"$in": [1, 3, 4]}}, doc! {"$push": {"tags": "odd-ish"}, "$inc": {"n": 10}}).unwrap();
    assert_eq!((r.matched, r.modified), (3, 3));
    assert_eq!(c.count(doc! {"n": {"$gte": 10}}).unwrap(), 3);
    assert_eq!(c.count(doc! {"tags": ["odd-ish"]}).unwrap(), 3);
    assert_eq!(c.count(doc! {"tags": []}).unwrap(), 2);
}

#[test]
fn or_and_unknown_operators_at_collection_level() {
    let db = Database::in_memory();
    let c = db.collection("users");
    c.insert_many(&[doc! {"name": "Alice", "age": 30}, doc! {"name": "Bob", "age": 25}, doc! {"name": "Cy"}]).unwrap();
    assert_eq!(c.count(doc! {"$or": [{"name": "Cy"}, {"age": {"$lt": 26}}]}).unwrap(), 2);
    // absent age reads as null
    assert_eq!(c.count(doc! {"age": null}).unwrap(), 1);
    assert_eq!(c.count(doc! {"$where": "anything", "name": "Alice"}).unwrap(), 1);
    assert_eq!(c.count(doc! {"age": {"$nin": [25, 30]}}).unwrap(), 1);
}
