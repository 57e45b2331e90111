#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(filter) = keradb::query::parse_filter_json(s) {
            let _ = filter.as_id_lookup();
            let _ = filter.is_empty();
        }
    }
});
