//! Per-surface reactive data store.
//!
//! `DataStore` holds one JSON tree behind a single swap point. Every mutation
//! builds a brand-new tree via the copy-on-write functions in [`crate::tree`]
//! and swaps the shared snapshot, so readers holding an earlier snapshot are
//! never affected by later writes.

use crate::{delete_at, get_at, set_at, Path};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, PoisonError};

/// Callback invoked with the new snapshot after each mutation.
pub type Subscriber = Arc<dyn Fn(&Arc<Value>) + Send + Sync>;

/// Handle returned by [`DataStore::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Subscriber)>,
}

/// A reactive holder for one JSON value tree.
///
/// Reads clone an `Arc` snapshot under a brief lock; writes replace the tree
/// wholesale and notify subscribers. Typed getters return `None` on absence
/// or primitive-kind mismatch, never an error.
///
/// # Examples
///
/// ```
/// use strata_state::DataStore;
/// use serde_json::json;
///
/// let store = DataStore::new();
/// store.update("/user/name", json!("Ada"));
/// assert_eq!(store.get_string("/user/name").as_deref(), Some("Ada"));
///
/// store.delete("/user/name");
/// assert!(store.get_string("/user/name").is_none());
/// ```
pub struct DataStore {
    current: Mutex<Arc<Value>>,
    subscribers: Mutex<Subscribers>,
}

impl DataStore {
    /// Create an empty store (`{}` at the root).
    pub fn new() -> Self {
        Self::with_value(Value::Object(Map::new()))
    }

    /// Create a store seeded with an initial tree.
    pub fn with_value(value: Value) -> Self {
        Self {
            current: Mutex::new(Arc::new(value)),
            subscribers: Mutex::new(Subscribers::default()),
        }
    }

    /// Get the current snapshot.
    ///
    /// The returned tree is immutable; later writes swap in a new snapshot
    /// and never modify one already handed out.
    pub fn snapshot(&self) -> Arc<Value> {
        Arc::clone(&self.current.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Get the value at a path, cloned out of the current snapshot.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.get_value(&Path::parse(path))
    }

    /// Get a string at a path.
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.string_at(&Path::parse(path))
    }

    /// Get a number at a path.
    pub fn get_number(&self, path: &str) -> Option<f64> {
        self.number_at(&Path::parse(path))
    }

    /// Get a boolean at a path.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.bool_at(&Path::parse(path))
    }

    /// Get the length of the array at a path, or `None` if the path does not
    /// resolve to an array.
    pub fn get_array_len(&self, path: &str) -> Option<usize> {
        self.array_len_at(&Path::parse(path))
    }

    /// Get the keys of the object at a path, or `None` if the path does not
    /// resolve to an object.
    pub fn get_object_keys(&self, path: &str) -> Option<Vec<String>> {
        self.object_keys_at(&Path::parse(path))
    }

    /// Write a value at a path and publish the new snapshot.
    ///
    /// A container value at the root path replaces the entire tree.
    pub fn update(&self, path: &str, value: Value) {
        self.update_at(&Path::parse(path), value);
    }

    /// Delete the value at a path and publish the new snapshot.
    ///
    /// Deleting at the root clears the store to `{}`.
    pub fn delete(&self, path: &str) {
        self.delete_at_path(&Path::parse(path));
    }

    /// Register a callback invoked with each new snapshot.
    pub fn subscribe(&self, callback: Subscriber) -> SubscriptionId {
        let mut subs = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(subs.next_id);
        subs.next_id += 1;
        subs.entries.push((id, callback));
        id
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subs.entries.retain(|(sub_id, _)| *sub_id != id);
    }

    pub(crate) fn get_value(&self, path: &Path) -> Option<Value> {
        get_at(&self.snapshot(), path).cloned()
    }

    pub(crate) fn string_at(&self, path: &Path) -> Option<String> {
        let snapshot = self.snapshot();
        get_at(&snapshot, path)?.as_str().map(str::to_owned)
    }

    pub(crate) fn number_at(&self, path: &Path) -> Option<f64> {
        get_at(&self.snapshot(), path)?.as_f64()
    }

    pub(crate) fn bool_at(&self, path: &Path) -> Option<bool> {
        get_at(&self.snapshot(), path)?.as_bool()
    }

    pub(crate) fn array_len_at(&self, path: &Path) -> Option<usize> {
        get_at(&self.snapshot(), path)?.as_array().map(Vec::len)
    }

    pub(crate) fn object_keys_at(&self, path: &Path) -> Option<Vec<String>> {
        let snapshot = self.snapshot();
        let map = get_at(&snapshot, path)?.as_object()?;
        Some(map.keys().cloned().collect())
    }

    pub(crate) fn update_at(&self, path: &Path, value: Value) {
        self.swap(|doc| set_at(doc, path, value));
    }

    pub(crate) fn delete_at_path(&self, path: &Path) {
        self.swap(|doc| delete_at(doc, path));
    }

    fn swap(&self, mutate: impl FnOnce(&Value) -> Value) {
        let next = {
            let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            let next = Arc::new(mutate(&guard));
            *guard = Arc::clone(&next);
            next
        };
        self.notify(&next);
    }

    fn notify(&self, snapshot: &Arc<Value>) {
        // Callbacks may subscribe/unsubscribe reentrantly; never hold the
        // lock while invoking them.
        let callbacks: Vec<Subscriber> = {
            let subs = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            subs.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in callbacks {
            callback(snapshot);
        }
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore").finish_non_exhaustive()
    }
}
