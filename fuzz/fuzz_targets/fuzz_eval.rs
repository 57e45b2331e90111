#![no_main]
use keradb::doc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(filter) = keradb::query::parse_filter_json(s) {
            let docs = [
                doc! {"a": 1, "b": 2, "name": "x"},
                doc! {"a": 10, "b": -5.5, "name": "y", "nested": {"z": 3}},
                doc! {"active": true, "tags": [1, "two", null]},
            ];
            for d in &docs {
                let _ = keradb::query::eval_filter(d, &filter);
            }
        }
    }
});
