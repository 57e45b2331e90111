#![no_main]
use keradb::doc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(update) = keradb::query::parse_update_json(s) {
            let before = doc! {"_id": "fz", "n": 1, "tags": ["a"], "name": "x"};
            let after = keradb::query::apply_update(&before, &update);
            assert_eq!(after.get("_id"), before.get("_id"));
        }
    }
});
