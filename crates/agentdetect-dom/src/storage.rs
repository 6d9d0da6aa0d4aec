//! The tab-persistent storage port.
//!
//! Per Design Notes ("Storage abstraction"), the only non-pure dependency
//! beyond the DOM event/mutation feed is modeled as this trait, so the
//! engine is testable under a simulated store.

/// A tab-scoped, best-effort key/value store. `read` returns `None` on any
/// failure (missing key or backend error — the engine cannot and need not
/// distinguish them); `write` never returns an error to its caller, since
/// `StorageFailure` is swallowed at the call site per spec.md §7.
pub trait TabStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: String);
}

/// Lets callers hold a single `Arc<dyn TabStorage>` and pass it by
/// reference into every component that needs the port (Recorder,
/// Fingerprint Collector), instead of threading a generic storage type
/// parameter through the whole composition.
impl<T: TabStorage + ?Sized> TabStorage for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }
    fn write(&self, key: &str, value: String) {
        (**self).write(key, value)
    }
}
