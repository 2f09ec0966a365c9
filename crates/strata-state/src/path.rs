//! Pointer-style paths for navigating JSON document structure.
//!
//! A path is a `/`-delimited sequence of segments. Segments are stored as
//! plain strings: whether a segment addresses an array index or an object key
//! is decided at traversal time by the kind of node it meets, not at parse
//! time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A parsed path into a JSON document.
///
/// The empty path (no segments) denotes the document root. `""`, `"/"` and
/// paths with doubled or trailing slashes normalize to the same segment list
/// as their canonical form.
///
/// # Examples
///
/// ```
/// use strata_state::Path;
///
/// let path = Path::parse("/items/0/name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "/items/0/name");
///
/// assert!(Path::parse("/").is_root());
/// assert_eq!(Path::parse("//a//"), Path::parse("/a"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<String>);

impl Path {
    /// Create an empty path (root).
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a pointer string into a path.
    ///
    /// Splits on `/` and drops empty segments, so leading, trailing and
    /// doubled slashes are all tolerated.
    pub fn parse(s: &str) -> Self {
        Self(
            s.split('/')
                .filter(|seg| !seg.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Create a path from a list of segments.
    #[inline]
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Append a key segment and return self (builder pattern).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(k.into());
        self
    }

    /// Push a segment onto the path (mutating).
    #[inline]
    pub fn push(&mut self, seg: impl Into<String>) {
        self.0.push(seg.into());
    }

    /// Get the segments of this path.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Check if this path is the root (no segments).
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of segments in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this path is empty (alias for [`Path::is_root`]).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the last segment.
    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Join this path with another path, concatenating segments.
    #[inline]
    pub fn join(&self, other: &Path) -> Path {
        let mut result = self.clone();
        result.0.extend(other.0.iter().cloned());
        result
    }

    /// Get the parent path (path without the last segment).
    ///
    /// Returns `None` for the root path.
    #[inline]
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            Some(Path(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Iterate over the segments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "/")
        } else {
            for seg in &self.0 {
                write!(f, "/{seg}")?;
            }
            Ok(())
        }
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Path::parse(&s))
    }
}
