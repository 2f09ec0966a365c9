//! Pure navigation and mutation over a JSON document tree.
//!
//! All mutating functions here are copy-on-write: they never touch the input
//! tree and instead return a new one, shallow-copying only the containers
//! along the addressed path. Navigation failures (missing key, out-of-range
//! index, non-container with remaining segments) yield absence, never an
//! error.

use crate::Path;
use serde_json::{Map, Value};

/// Resolve a path against a document, returning the addressed value.
///
/// Objects are entered by key lookup; arrays by integer-parsing the segment.
/// Any failure along the way returns `None`.
///
/// # Examples
///
/// ```
/// use strata_state::{get_at, Path};
/// use serde_json::json;
///
/// let doc = json!({"items": [{"name": "Apple"}]});
/// let value = get_at(&doc, &Path::parse("/items/0/name"));
/// assert_eq!(value, Some(&json!("Apple")));
///
/// assert!(get_at(&doc, &Path::parse("/items/7")).is_none());
/// ```
pub fn get_at<'a>(doc: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = doc;
    for seg in path.iter() {
        current = match current {
            Value::Object(map) => map.get(seg)?,
            Value::Array(arr) => arr.get(seg.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set a value at a path, returning a new document (copy-on-write).
///
/// Containers along the path are shallow-copied with the addressed child
/// replaced. A missing or wrong-kind intermediate is replaced by a fresh
/// empty object; arrays are never auto-created, but an existing array is
/// traversed in place when the segment parses to an in-range index.
///
/// Setting at the root path replaces the whole document when the new value
/// is itself a container, and is a no-op otherwise.
pub fn set_at(doc: &Value, path: &Path, value: Value) -> Value {
    if path.is_root() {
        return if value.is_object() || value.is_array() {
            value
        } else {
            doc.clone()
        };
    }
    write_at(Some(doc), path.segments(), value)
}

fn write_at(current: Option<&Value>, segments: &[String], value: Value) -> Value {
    let Some((seg, rest)) = segments.split_first() else {
        return value;
    };

    match current {
        Some(Value::Object(map)) => {
            let mut copy = map.clone();
            let child = write_at(map.get(seg), rest, value);
            copy.insert(seg.clone(), child);
            Value::Object(copy)
        }
        Some(Value::Array(arr)) => match seg.parse::<usize>().ok().filter(|i| *i < arr.len()) {
            Some(idx) => {
                let mut copy = arr.clone();
                copy[idx] = write_at(Some(&arr[idx]), rest, value);
                Value::Array(copy)
            }
            // Out-of-range or non-numeric segment: the array gives way to a
            // fresh object keyed by the segment text.
            None => synthesize_object(seg, rest, value),
        },
        _ => synthesize_object(seg, rest, value),
    }
}

fn synthesize_object(seg: &str, rest: &[String], value: Value) -> Value {
    let mut map = Map::new();
    map.insert(seg.to_owned(), write_at(None, rest, value));
    Value::Object(map)
}

/// Delete the value at a path, returning a new document (copy-on-write).
///
/// Removes exactly the leaf key from its immediate parent object. If any
/// intermediate segment is missing, or any container along the path is not
/// an object, the original document is returned unchanged — deleting a
/// non-existent path is not an error, and arrays are never deleted into.
///
/// Deleting at the root clears the document to an empty object.
pub fn delete_at(doc: &Value, path: &Path) -> Value {
    if path.is_root() {
        return Value::Object(Map::new());
    }
    remove_at(doc, path.segments())
}

fn remove_at(current: &Value, segments: &[String]) -> Value {
    let Value::Object(map) = current else {
        return current.clone();
    };

    match segments {
        [] => current.clone(),
        [leaf] => {
            let mut copy = map.clone();
            copy.remove(leaf);
            Value::Object(copy)
        }
        [seg, rest @ ..] => match map.get(seg) {
            Some(child) => {
                let mut copy = map.clone();
                copy.insert(seg.clone(), remove_at(child, rest));
                Value::Object(copy)
            }
            None => current.clone(),
        },
    }
}
