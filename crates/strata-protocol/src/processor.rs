//! The surface operation processor: the protocol state machine.
//!
//! A processor owns a registry of surfaces keyed by id and applies the four
//! operation kinds from whole snapshots and incremental patches. Ingestion
//! is tolerant by construction: malformed operations are dropped with a log
//! line, unknown discriminators are skipped, and nothing is ever fatal.
//!
//! Mutation goes through `&mut self`, which enforces the single-writer model
//! at compile time; queries return point-in-time views.

use crate::{
    CreateSurface, DeleteSurface, Operation, ProtocolError, Surface, UpdateComponents,
    UpdateDataModel,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use strata_state::DataStore;
use tracing::{debug, warn};

/// Notification emitted after each successfully applied operation.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// A `createSurface` was applied.
    SurfaceCreated {
        /// Target surface.
        surface_id: String,
    },
    /// Components were upserted into a surface.
    ComponentsUpdated {
        /// Target surface.
        surface_id: String,
        /// How many components the operation carried.
        count: usize,
    },
    /// The data model changed at a path.
    DataModelChanged {
        /// Target surface.
        surface_id: String,
        /// Canonical path of the write or delete.
        path: String,
    },
    /// A surface was destroyed.
    SurfaceDeleted {
        /// The removed surface.
        surface_id: String,
    },
}

impl SurfaceEvent {
    /// The surface this event concerns.
    pub fn surface_id(&self) -> &str {
        match self {
            SurfaceEvent::SurfaceCreated { surface_id }
            | SurfaceEvent::ComponentsUpdated { surface_id, .. }
            | SurfaceEvent::DataModelChanged { surface_id, .. }
            | SurfaceEvent::SurfaceDeleted { surface_id } => surface_id,
        }
    }
}

/// Callback invoked with each applied-operation event.
pub type SurfaceObserver = Arc<dyn Fn(&SurfaceEvent) + Send + Sync>;

/// Handle returned by [`SurfaceProcessor::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// A JSON-Patch-shaped delta entry. Only `add` at `/operations/<n>` is
/// meaningful to this protocol.
#[derive(Debug, Deserialize)]
struct DeltaEntry {
    op: String,
    path: String,
    #[serde(default)]
    value: Option<Value>,
}

/// Registry and state machine for all live surfaces.
///
/// Callers construct and own a processor explicitly; there is no ambient
/// singleton. Each operation is applied synchronously and atomically, in
/// the order presented.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata_protocol::SurfaceProcessor;
///
/// let mut processor = SurfaceProcessor::new();
/// processor.apply_snapshot(&json!({"operations": [
///     {"createSurface": {"surfaceId": "s1"}},
///     {"updateComponents": {"surfaceId": "s1", "components": [
///         {"id": "root", "component": "Text", "text": "Hi"}
///     ]}}
/// ]}));
///
/// let surface = processor.surface("s1").unwrap();
/// assert_eq!(surface.root_component().unwrap().component_type, "Text");
/// ```
pub struct SurfaceProcessor {
    surfaces: HashMap<String, Surface>,
    observers: Vec<(ObserverId, SurfaceObserver)>,
    next_observer_id: u64,
}

impl SurfaceProcessor {
    /// Create an empty processor.
    pub fn new() -> Self {
        Self {
            surfaces: HashMap::new(),
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    // ========================================================================
    // Ingestion
    // ========================================================================

    /// Apply a whole snapshot message: `{"operations": [...]}`.
    ///
    /// Operations are applied in order; each element is decoded
    /// independently, so one malformed entry never blocks the rest.
    pub fn apply_snapshot(&mut self, message: &Value) {
        let Some(operations) = message.get("operations").and_then(Value::as_array) else {
            warn!("snapshot message has no operations array, ignoring");
            return;
        };
        self.apply_operations(operations);
    }

    /// Apply a sequence of raw operation objects in order.
    pub fn apply_operations(&mut self, operations: &[Value]) {
        for raw in operations {
            self.apply_value(raw);
        }
    }

    /// Decode and apply one raw operation object.
    pub fn apply_value(&mut self, raw: &Value) {
        match Operation::from_value(raw) {
            Ok(op) => self.apply(op),
            Err(ProtocolError::UnknownOperation { keys }) => {
                debug!(?keys, "skipping operation with unknown discriminator");
            }
            Err(err) => {
                warn!(error = %err, "dropping malformed operation");
            }
        }
    }

    /// Apply an incremental patch: a JSON-Patch-like array where only
    /// `{"op": "add", "path": "/operations/<n>", "value": <operation>}`
    /// entries are actionable. Everything else is ignored.
    pub fn apply_delta(&mut self, patch: &Value) {
        let Some(entries) = patch.as_array() else {
            warn!("delta message is not a patch array, ignoring");
            return;
        };
        for raw in entries {
            let entry: DeltaEntry = match serde_json::from_value(raw.clone()) {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable patch entry");
                    continue;
                }
            };
            if entry.op != "add" || !is_operations_path(&entry.path) {
                debug!(op = %entry.op, path = %entry.path, "skipping inapplicable patch entry");
                continue;
            }
            match entry.value {
                Some(value) => self.apply_value(&value),
                None => debug!(path = %entry.path, "skipping add entry without value"),
            }
        }
    }

    /// Apply one decoded operation.
    pub fn apply(&mut self, op: Operation) {
        match op {
            Operation::CreateSurface(create) => self.create_surface(create),
            Operation::UpdateComponents(update) => self.update_components(update),
            Operation::UpdateDataModel(update) => self.update_data_model(update),
            Operation::DeleteSurface(delete) => self.delete_surface(delete),
        }
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    fn create_surface(&mut self, op: CreateSurface) {
        let surface = self.get_or_create_surface(&op.surface_id);
        surface.catalog_id = op.catalog_id;
        surface.theme = op.theme;
        surface.send_data_model = op.send_data_model;
        self.emit(SurfaceEvent::SurfaceCreated {
            surface_id: op.surface_id,
        });
    }

    fn update_components(&mut self, op: UpdateComponents) {
        let count = op.components.len();
        let surface = self.get_or_create_surface(&op.surface_id);
        for def in op.components {
            surface.upsert_component(def.into());
        }
        self.emit(SurfaceEvent::ComponentsUpdated {
            surface_id: op.surface_id,
            count,
        });
    }

    fn update_data_model(&mut self, op: UpdateDataModel) {
        let path = op.path.unwrap_or_else(|| "/".to_owned());
        let surface = self.get_or_create_surface(&op.surface_id);
        match op.value {
            // Presence of the value key (explicit null included) is a write;
            // its omission is a delete.
            Some(value) => surface.store.update(&path, value),
            None => surface.store.delete(&path),
        }
        self.emit(SurfaceEvent::DataModelChanged {
            surface_id: op.surface_id,
            path,
        });
    }

    fn delete_surface(&mut self, op: DeleteSurface) {
        if self.surfaces.remove(&op.surface_id).is_some() {
            self.emit(SurfaceEvent::SurfaceDeleted {
                surface_id: op.surface_id,
            });
        } else {
            debug!(surface_id = %op.surface_id, "deleteSurface for unknown surface, ignoring");
        }
    }

    fn get_or_create_surface(&mut self, surface_id: &str) -> &mut Surface {
        self.surfaces
            .entry(surface_id.to_owned())
            .or_insert_with(|| Surface::new(surface_id))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Look up a surface by id.
    pub fn surface(&self, surface_id: &str) -> Option<&Surface> {
        self.surfaces.get(surface_id)
    }

    /// The data store of a surface, shareable with readers.
    pub fn data_store(&self, surface_id: &str) -> Option<Arc<DataStore>> {
        self.surfaces.get(surface_id).map(|s| Arc::clone(&s.store))
    }

    /// Ids of all live surfaces (order is unspecified).
    pub fn surface_ids(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }

    /// Number of live surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check whether no surfaces are live.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Drop every surface.
    pub fn clear(&mut self) {
        self.surfaces.clear();
    }

    // ========================================================================
    // Observation
    // ========================================================================

    /// Register a callback invoked after each successfully applied operation.
    pub fn subscribe(&mut self, observer: SurfaceObserver) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&mut self, id: ObserverId) {
        self.observers.retain(|(observer_id, _)| *observer_id != id);
    }

    fn emit(&self, event: SurfaceEvent) {
        for (_, observer) in &self.observers {
            observer(&event);
        }
    }
}

impl Default for SurfaceProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SurfaceProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceProcessor")
            .field("surfaces", &self.surfaces.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn is_operations_path(path: &str) -> bool {
    path.strip_prefix("/operations/")
        .is_some_and(|index| index.parse::<usize>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_or_create_on_update_components() {
        let mut processor = SurfaceProcessor::new();
        processor.apply_value(&json!({
            "updateComponents": {
                "surfaceId": "implicit",
                "components": [{"id": "root", "component": "Text"}]
            }
        }));
        assert_eq!(processor.len(), 1);
        assert!(processor.surface("implicit").is_some());
    }

    #[test]
    fn test_create_overwrites_config_keeps_state() {
        let mut processor = SurfaceProcessor::new();
        processor.apply_value(&json!({
            "updateComponents": {
                "surfaceId": "s1",
                "components": [{"id": "root", "component": "Text"}]
            }
        }));
        processor.apply_value(&json!({
            "createSurface": {"surfaceId": "s1", "catalogId": "material"}
        }));

        let surface = processor.surface("s1").unwrap();
        assert_eq!(surface.catalog_id(), Some("material"));
        // Reconfiguration does not destroy the component map.
        assert!(surface.root_component().is_some());
    }

    #[test]
    fn test_delete_then_reference_starts_fresh() {
        let mut processor = SurfaceProcessor::new();
        processor.apply_value(&json!({
            "updateDataModel": {"surfaceId": "s1", "path": "/x", "value": 1}
        }));
        processor.apply_value(&json!({"deleteSurface": {"surfaceId": "s1"}}));
        processor.apply_value(&json!({
            "updateComponents": {"surfaceId": "s1", "components": []}
        }));

        let surface = processor.surface("s1").unwrap();
        assert!(surface.store().get("/x").is_none());
    }

    #[test]
    fn test_malformed_operation_dropped_processing_continues() {
        let mut processor = SurfaceProcessor::new();
        processor.apply_operations(&[
            json!({"createSurface": {}}),
            json!({"createSurface": {"surfaceId": "ok"}}),
        ]);
        assert_eq!(processor.len(), 1);
        assert!(processor.surface("ok").is_some());
    }

    #[test]
    fn test_unknown_discriminator_skipped() {
        let mut processor = SurfaceProcessor::new();
        processor.apply_operations(&[
            json!({"somethingElse": {"surfaceId": "x"}}),
            json!(42),
        ]);
        assert!(processor.is_empty());
    }

    #[test]
    fn test_delta_only_add_at_operations_path() {
        let mut processor = SurfaceProcessor::new();
        processor.apply_delta(&json!([
            {"op": "add", "path": "/operations/0",
             "value": {"createSurface": {"surfaceId": "s1"}}},
            {"op": "remove", "path": "/operations/0"},
            {"op": "replace", "path": "/operations/0",
             "value": {"createSurface": {"surfaceId": "s2"}}},
            {"op": "add", "path": "/elsewhere/0",
             "value": {"createSurface": {"surfaceId": "s3"}}}
        ]));
        assert_eq!(processor.len(), 1);
        assert!(processor.surface("s1").is_some());
    }

    #[test]
    fn test_observer_sees_events() {
        let mut processor = SurfaceProcessor::new();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        processor.subscribe(Arc::new(move |event: &SurfaceEvent| {
            sink.lock().unwrap().push(event.clone());
        }));

        processor.apply_value(&json!({"createSurface": {"surfaceId": "s1"}}));
        processor.apply_value(&json!({
            "updateDataModel": {"surfaceId": "s1", "path": "/x", "value": 1}
        }));
        processor.apply_value(&json!({"deleteSurface": {"surfaceId": "s1"}}));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen[1],
            SurfaceEvent::DataModelChanged {
                surface_id: "s1".into(),
                path: "/x".into()
            }
        );
        assert!(seen.iter().all(|e| e.surface_id() == "s1"));
    }

    #[test]
    fn test_unsubscribe() {
        let mut processor = SurfaceProcessor::new();
        let count = Arc::new(std::sync::Mutex::new(0));
        let sink = Arc::clone(&count);
        let id = processor.subscribe(Arc::new(move |_: &SurfaceEvent| {
            *sink.lock().unwrap() += 1;
        }));

        processor.apply_value(&json!({"createSurface": {"surfaceId": "s1"}}));
        processor.unsubscribe(id);
        processor.apply_value(&json!({"createSurface": {"surfaceId": "s2"}}));

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_clear() {
        let mut processor = SurfaceProcessor::new();
        processor.apply_value(&json!({"createSurface": {"surfaceId": "s1"}}));
        processor.apply_value(&json!({"createSurface": {"surfaceId": "s2"}}));
        processor.clear();
        assert!(processor.is_empty());
    }
}
