//! Components: nodes of a surface's UI tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The id that marks a surface's root component, by convention.
pub const ROOT_COMPONENT_ID: &str = "root";

/// Wire-form component definition (flat form).
///
/// Everything other than `id`, `component`, and `weight` is collected into
/// the component's properties.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata_protocol::ComponentDef;
///
/// let def: ComponentDef =
///     serde_json::from_value(json!({"id": "root", "component": "Text", "text": "Hi"})).unwrap();
/// assert_eq!(def.component, "Text");
/// assert_eq!(def.properties["text"], json!("Hi"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    /// Unique component id within its surface.
    pub id: String,
    /// Component type discriminator (e.g. `"Text"`, `"Column"`).
    pub component: String,
    /// Optional layout weight hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Type-specific properties: every other key of the wire object.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// One node of a surface's UI tree.
///
/// Owned exclusively by its surface; an update targeting the same id
/// replaces the component wholesale, never merges fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    /// Unique id within the surface.
    pub id: String,
    /// Component type discriminator.
    pub component_type: String,
    /// Type-specific properties; may contain literals, path references, or
    /// function-call references.
    pub properties: Map<String, Value>,
    /// Optional layout weight hint.
    pub weight: Option<f64>,
}

impl From<ComponentDef> for Component {
    fn from(def: ComponentDef) -> Self {
        Self {
            id: def.id,
            component_type: def.component,
            properties: def.properties,
            weight: def.weight,
        }
    }
}

impl Component {
    /// Check whether this component is the conventional root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.id == ROOT_COMPONENT_ID
    }
}
