use keradb::query::{UpdateDoc, apply_update};
use keradb::{Document, Value, doc};
use proptest::prelude::*;

fn field_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn small_doc() -> impl Strategy<Value = Document> {
    proptest::collection::vec((field_name(), scalar()), 0..6).prop_map(|kv| {
        let mut d: Document = kv.into_iter().collect();
        d.insert("_id", "fixed");
        d
    })
}

fn set_of(fields: &Document) -> UpdateDoc {
    let mut u = Document::new();
    u.insert("$set", fields.clone());
    UpdateDoc::parse(&u)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        .. proptest::test_runner::Config::default()
    })]
    #[test]
    fn prop_set_reads_back(d in small_doc(), x in proptest::collection::vec((field_name(), scalar()), 0..6)) {
        let x: Document = x.into_iter().collect();
        let out = apply_update(&d, &set_of(&x));
        for (k, v) in &x {
            prop_assert_eq!(out.get(k), Some(v));
        }
        prop_assert_eq!(out.get("_id"), d.get("_id"));
    }

    #[test]
    fn prop_set_is_idempotent(d in small_doc(), x in proptest::collection::vec((field_name(), scalar()), 0..6)) {
        let u = set_of(&x.into_iter().collect());
        let once = apply_update(&d, &u);
        prop_assert_eq!(apply_update(&once, &u), once);
    }

    #[test]
    fn prop_replacement_is_idempotent(d in small_doc(), r in small_doc()) {
        let u = UpdateDoc::parse(&r);
        prop_assert!(u.is_replacement());
        let once = apply_update(&d, &u);
        prop_assert_eq!(apply_update(&once, &u), once.clone());
        prop_assert_eq!(once.get("_id"), Some(&Value::from("fixed")));
    }

    #[test]
    fn prop_inc_is_not_idempotent(start in -1_000_000i64..1_000_000, by in 1i64..1000) {
        let d = doc!{"n": start};
        let u = UpdateDoc::parse(&doc!{"$inc": {"n": by}});
        let once = apply_update(&d, &u);
        let twice = apply_update(&once, &u);
        prop_assert_ne!(&once, &twice);
        prop_assert_eq!(twice.get("n"), Some(&Value::Int(start + 2 * by)));
    }

    #[test]
    fn prop_push_is_not_idempotent(v in scalar()) {
        let mut push = Document::new();
        let mut fields = Document::new();
        fields.insert("list", v.clone());
        push.insert("$push", fields);
        let u = UpdateDoc::parse(&push);
        let once = apply_update(&doc!{}, &u);
        let twice = apply_update(&once, &u);
        prop_assert_ne!(&once, &twice);
        prop_assert_eq!(twice.get("list"), Some(&Value::Array(vec![v.clone(), v])));
    }
}
