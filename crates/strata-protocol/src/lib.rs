//! Surface operation processor for the agent-driven UI protocol.
//!
//! `strata-protocol` is the protocol state machine of the surface
//! synchronization core. An external agent streams typed operations —
//! `createSurface`, `updateComponents`, `updateDataModel`, `deleteSurface` —
//! as whole snapshots or incremental JSON-Patch-style deltas; the
//! [`SurfaceProcessor`] reconstructs per-surface state (a component tree
//! plus a [`strata_state::DataStore`]) and exposes a read-only query surface
//! for a renderer.
//!
//! Ingestion is tolerant: malformed operations are dropped with a log line,
//! unknown discriminators and inapplicable patch entries are skipped, and no
//! input is ever fatal.
//!
//! ```
//! use serde_json::json;
//! use strata_protocol::SurfaceProcessor;
//!
//! let mut processor = SurfaceProcessor::new();
//! processor.apply_snapshot(&json!({"operations": [
//!     {"createSurface": {"surfaceId": "checkout"}},
//!     {"updateDataModel": {"surfaceId": "checkout", "path": "/cart/total", "value": 42}}
//! ]}));
//!
//! let store = processor.data_store("checkout").unwrap();
//! assert_eq!(store.get_number("/cart/total"), Some(42.0));
//! ```

mod component;
mod error;
mod op;
mod processor;
mod surface;

pub use component::{Component, ComponentDef, ROOT_COMPONENT_ID};
pub use error::{ProtocolError, ProtocolResult};
pub use op::{CreateSurface, DeleteSurface, Operation, UpdateComponents, UpdateDataModel};
pub use processor::{ObserverId, SurfaceEvent, SurfaceObserver, SurfaceProcessor};
pub use surface::Surface;
