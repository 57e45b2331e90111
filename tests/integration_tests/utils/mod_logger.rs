use keradb::utils::logger;
use keradb::{Database, doc};

#[test]
fn query_lines_go_to_query_log() {
    let dir = tempfile::tempdir().unwrap();
    logger::configure_logging(Some(dir.path()), Some("debug"), Some(2)).unwrap();
    let db = Database::in_memory();
    let c = db.collection("logged");
    let id = c.insert_document(&doc! {"a": 1}).unwrap().inserted_id;
    assert!(c.find_one(doc! {"_id": id.as_str()}).unwrap().is_found());
    log::info!("app line");

    let query_log = std::fs::read_to_string(dir.path().join("query.log")).unwrap();
    assert!(query_log.contains("key lookup logged/"));
    let app_log = std::fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(app_log.contains("app line"));
    assert!(!app_log.contains("key lookup"));
}
