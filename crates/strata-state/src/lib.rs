//! Path-addressed reactive data store over immutable JSON trees.
//!
//! `strata-state` is the data layer of the surface synchronization core. It
//! provides:
//!
//! - **[`Path`]**: pointer-style `/`-delimited paths, parsed into plain
//!   string segments (array-vs-object meaning is decided at traversal time);
//! - **[`get_at`] / [`set_at`] / [`delete_at`]**: pure copy-on-write
//!   navigation and mutation over `serde_json::Value` trees;
//! - **[`DataStore`]**: one mutable reference to an immutable tree, replaced
//!   wholesale per write, with typed getters and change notification;
//! - **[`DataContext`]**: a view that prefixes a base path onto every lookup,
//!   used for per-item data binding in repeated/template structures.
//!
//! # Snapshot isolation
//!
//! ```
//! use strata_state::DataStore;
//! use serde_json::json;
//!
//! let store = DataStore::new();
//! store.update("/count", json!(1));
//!
//! let snapshot = store.snapshot();
//! store.update("/count", json!(2));
//!
//! // The captured snapshot never changes underneath its holder.
//! assert_eq!(snapshot["count"], json!(1));
//! assert_eq!(store.get_number("/count"), Some(2.0));
//! ```

mod context;
mod path;
mod store;
mod tree;

pub use context::DataContext;
pub use path::Path;
pub use store::{DataStore, Subscriber, SubscriptionId};
pub use tree::{delete_at, get_at, set_at};
