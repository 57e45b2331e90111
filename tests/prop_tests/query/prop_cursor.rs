use keradb::doc;
use keradb::query::Cursor;
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        .. proptest::test_runner::Config::default()
    })]
    // skip(s).limit(l).all() has max(0, min(l, N - s)) elements starting at index s
    #[test]
    fn prop_window_formula(n in 0usize..40, s in 0usize..50, l in 0usize..50) {
        let docs = (0..n).map(|i| doc!{"i": i}).collect::<Vec<_>>();
        let mut c = Cursor::new(docs);
        let page = c.skip(s).limit(l).all();
        let expected = if s >= n { 0 } else { l.min(n - s) };
        prop_assert_eq!(page.len(), expected);
        for (k, d) in page.iter().enumerate() {
            prop_assert_eq!(d.get("i").and_then(keradb::Value::as_i64), Some((s + k) as i64));
        }
        // stepping visits exactly the window
        let mut steps = 0;
        while c.advance() {
            steps += 1;
        }
        prop_assert_eq!(steps, expected);
    }

    #[test]
    fn prop_unbounded_limit_is_suffix(n in 0usize..40, s in 0usize..50) {
        let mut c = Cursor::new((0..n).map(|i| doc!{"i": i}).collect());
        prop_assert_eq!(c.skip(s).all().len(), n.saturating_sub(s));
    }
}
