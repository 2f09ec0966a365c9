//! Scoped views over a data store.
//!
//! A `DataContext` prefixes a base path onto every path argument before
//! delegating to the shared store. Repeated/template structures hand each
//! item a context scoped to its position so item code can use relative paths
//! (`"/"` for the item itself) without knowing where it lives.

use crate::{DataStore, Path};
use serde_json::Value;
use std::sync::Arc;

/// A view over a [`DataStore`] with a base path prefix.
///
/// Contexts are cheap to clone and independent of one another; all of them
/// read and write the same underlying store.
///
/// # Examples
///
/// ```
/// use strata_state::DataStore;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let store = Arc::new(DataStore::new());
/// store.update("/items", json!([{"name": "Apple"}, {"name": "Banana"}]));
///
/// let item = store.scoped("/items/0");
/// assert_eq!(item.get_string("/name").as_deref(), Some("Apple"));
/// ```
#[derive(Clone, Debug)]
pub struct DataContext {
    store: Arc<DataStore>,
    base: Path,
}

impl DataContext {
    /// Create a context over a store with the given base path.
    pub fn new(store: Arc<DataStore>, base: Path) -> Self {
        Self { store, base }
    }

    /// The base path this context prefixes onto every lookup.
    pub fn base_path(&self) -> &Path {
        &self.base
    }

    /// The store this context delegates to.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    /// Create a nested context; prefixes concatenate.
    pub fn scoped(&self, base: &str) -> DataContext {
        Self {
            store: Arc::clone(&self.store),
            base: self.base.join(&Path::parse(base)),
        }
    }

    /// Get the value at a path relative to this context.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.store.get_value(&self.absolute(path))
    }

    /// Get a string at a relative path.
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.store.string_at(&self.absolute(path))
    }

    /// Get a number at a relative path.
    pub fn get_number(&self, path: &str) -> Option<f64> {
        self.store.number_at(&self.absolute(path))
    }

    /// Get a boolean at a relative path.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.store.bool_at(&self.absolute(path))
    }

    /// Get the length of the array at a relative path.
    pub fn get_array_len(&self, path: &str) -> Option<usize> {
        self.store.array_len_at(&self.absolute(path))
    }

    /// Get the keys of the object at a relative path.
    pub fn get_object_keys(&self, path: &str) -> Option<Vec<String>> {
        self.store.object_keys_at(&self.absolute(path))
    }

    /// Write a value at a relative path.
    pub fn update(&self, path: &str, value: Value) {
        self.store.update_at(&self.absolute(path), value);
    }

    /// Delete the value at a relative path.
    pub fn delete(&self, path: &str) {
        self.store.delete_at_path(&self.absolute(path));
    }

    fn absolute(&self, path: &str) -> Path {
        self.base.join(&Path::parse(path))
    }
}

impl DataStore {
    /// Create a context rooted at the top of this store.
    pub fn context(self: &Arc<Self>) -> DataContext {
        DataContext::new(Arc::clone(self), Path::root())
    }

    /// Create a context scoped to a base path.
    pub fn scoped(self: &Arc<Self>, base: &str) -> DataContext {
        DataContext::new(Arc::clone(self), Path::parse(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with_items() -> Arc<DataStore> {
        let store = Arc::new(DataStore::new());
        store.update(
            "/items",
            json!([{"name": "Apple"}, {"name": "Banana"}]),
        );
        store
    }

    #[test]
    fn test_scoped_read() {
        let store = store_with_items();
        let ctx = store.scoped("/items/0");
        assert_eq!(ctx.get_string("/name").as_deref(), Some("Apple"));
        let ctx = store.scoped("/items/1");
        assert_eq!(ctx.get_string("/name").as_deref(), Some("Banana"));
    }

    #[test]
    fn test_root_context_passthrough() {
        let store = store_with_items();
        let ctx = store.context();
        assert_eq!(ctx.get_string("/items/0/name").as_deref(), Some("Apple"));
    }

    #[test]
    fn test_relative_root_resolves_to_item() {
        let store = store_with_items();
        let ctx = store.scoped("/items/1");
        assert_eq!(ctx.get("/"), Some(json!({"name": "Banana"})));
    }

    #[test]
    fn test_nesting_concatenates_prefixes() {
        let store = Arc::new(DataStore::new());
        store.update("/a", json!({"b": {"c": 42}}));
        let ctx = store.scoped("/a").scoped("/b");
        assert_eq!(ctx.base_path(), &Path::parse("/a/b"));
        assert_eq!(ctx.get_number("/c"), Some(42.0));
    }

    #[test]
    fn test_scoped_write() {
        let store = store_with_items();
        let ctx = store.scoped("/items/0");
        ctx.update("/name", json!("Cherry"));
        assert_eq!(store.get_string("/items/0/name").as_deref(), Some("Cherry"));
    }

    #[test]
    fn test_scoped_delete() {
        let store = store_with_items();
        let ctx = store.scoped("/items/0");
        ctx.delete("/name");
        assert!(store.get_string("/items/0/name").is_none());
    }
}
