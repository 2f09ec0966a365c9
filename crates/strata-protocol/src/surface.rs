//! Surfaces: the unit of isolation and lifecycle.

use crate::{Component, ROOT_COMPONENT_ID};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use strata_state::DataStore;

/// An isolated, independently lifecycled UI state unit: a component tree
/// plus one reactive data store, identified by a string id.
///
/// Surfaces are created and mutated exclusively through operations applied
/// by a [`crate::SurfaceProcessor`]; consumers read them through the query
/// surface and must not mutate them directly.
#[derive(Debug)]
pub struct Surface {
    pub(crate) surface_id: String,
    pub(crate) catalog_id: Option<String>,
    pub(crate) theme: Option<Value>,
    pub(crate) send_data_model: bool,
    pub(crate) components: HashMap<String, Component>,
    pub(crate) store: Arc<DataStore>,
}

impl Surface {
    pub(crate) fn new(surface_id: impl Into<String>) -> Self {
        Self {
            surface_id: surface_id.into(),
            catalog_id: None,
            theme: None,
            send_data_model: false,
            components: HashMap::new(),
            store: Arc::new(DataStore::new()),
        }
    }

    /// Upsert a component by id; last write wins, full replacement.
    pub(crate) fn upsert_component(&mut self, component: Component) {
        self.components.insert(component.id.clone(), component);
    }

    /// The surface's id.
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    /// The widget vocabulary this surface renders with, when declared.
    pub fn catalog_id(&self) -> Option<&str> {
        self.catalog_id.as_deref()
    }

    /// The opaque theme blob, when declared.
    pub fn theme(&self) -> Option<&Value> {
        self.theme.as_ref()
    }

    /// Whether the host should report the data model back to the agent.
    pub fn send_data_model(&self) -> bool {
        self.send_data_model
    }

    /// Look up a component by id.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// The root component, by the `"root"` id convention.
    ///
    /// A surface with no root yet is not an error — it simply has nothing
    /// renderable.
    pub fn root_component(&self) -> Option<&Component> {
        self.components.get(ROOT_COMPONENT_ID)
    }

    /// Iterate over all components (order is unspecified).
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// The ids of all components (order is unspecified).
    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Number of components in the tree.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check whether the surface has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The surface's reactive data store.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    /// Point-in-time snapshot of the data model, for hosts honoring
    /// [`Surface::send_data_model`].
    pub fn data_model(&self) -> Arc<Value> {
        self.store.snapshot()
    }
}
