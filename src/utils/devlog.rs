//! Developer trace lines ("level 6"): structured bench output from the query executor,
//! captured per thread so tests can assert on it without touching the global logger.

use std::cell::RefCell;
use std::time::Instant;

thread_local! {
    static TL_SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Disables the thread-local sink on drop.
pub struct DevSinkGuard;

impl Drop for DevSinkGuard {
    fn drop(&mut self) {
        TL_SINK.with(|s| *s.borrow_mut() = None);
    }
}

/// Starts capturing `dev6!` lines on the current thread.
pub fn enable_thread_sink() -> DevSinkGuard {
    TL_SINK.with(|s| *s.borrow_mut() = Some(Vec::new()));
    DevSinkGuard
}

pub fn write_str(msg: &str) {
    TL_SINK.with(|s| {
        if let Some(buf) = s.borrow_mut().as_mut() {
            buf.push(msg.to_owned());
        }
    });
}

/// Takes the lines captured so far on this thread.
pub fn drain() -> Vec<String> {
    TL_SINK.with(|s| s.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

pub fn snapshot() -> Vec<String> {
    TL_SINK.with(|s| s.borrow().as_ref().cloned().unwrap_or_default())
}

/// Emits one JSON bench line: `{"bench":"query","op":..,"collection":..,"duration_ms":..}`
/// followed by `fields`.
pub fn bench(op: &str, collection: &str, start: Instant, fields: &[(&str, serde_json::Value)]) {
    let mut line = serde_json::Map::new();
    line.insert("bench".into(), "query".into());
    line.insert("op".into(), op.into());
    line.insert("collection".into(), collection.into());
    let ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    line.insert("duration_ms".into(), ms.into());
    for (k, v) in fields {
        line.insert((*k).to_owned(), v.clone());
    }
    crate::dev6!("{}", serde_json::Value::Object(line));
}

/// Emits a developer trace line to the thread sink and the `keradb::dev6` log target.
#[macro_export]
macro_rules! dev6 {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        $crate::utils::devlog::write_str(&__s);
        $crate::__log::log!(target: $crate::utils::logger::DEV6_TARGET, $crate::__log::Level::Trace, "{}", __s);
    }};
}
