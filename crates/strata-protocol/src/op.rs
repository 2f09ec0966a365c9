//! Protocol operations.
//!
//! Each wire operation is an object with a single discriminating key
//! (`createSurface`, `updateComponents`, `updateDataModel`, `deleteSurface`)
//! whose payload names a surface. Operations are the only way surface state
//! is created or mutated.

use crate::{ComponentDef, ProtocolError, ProtocolResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const OPERATION_KEYS: [&str; 4] = [
    "createSurface",
    "updateComponents",
    "updateDataModel",
    "deleteSurface",
];

/// One instruction in the protocol's operation log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Create (or reconfigure) a surface.
    #[serde(rename = "createSurface")]
    CreateSurface(CreateSurface),
    /// Upsert components into a surface's tree.
    #[serde(rename = "updateComponents")]
    UpdateComponents(UpdateComponents),
    /// Write or delete a value in a surface's data model.
    #[serde(rename = "updateDataModel")]
    UpdateDataModel(UpdateDataModel),
    /// Destroy a surface entirely.
    #[serde(rename = "deleteSurface")]
    DeleteSurface(DeleteSurface),
}

impl Operation {
    /// Decode an operation from its wire object.
    ///
    /// Distinguishes an unrecognized discriminator (skippable per protocol
    /// tolerance) from a recognized operation with a malformed payload
    /// (dropped with a warning).
    pub fn from_value(value: &Value) -> ProtocolResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| ProtocolError::invalid_message("operation must be an object"))?;
        if !OPERATION_KEYS.iter().any(|key| obj.contains_key(*key)) {
            return Err(ProtocolError::unknown_operation(
                obj.keys().cloned().collect(),
            ));
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// The surface this operation targets.
    pub fn surface_id(&self) -> &str {
        match self {
            Operation::CreateSurface(op) => &op.surface_id,
            Operation::UpdateComponents(op) => &op.surface_id,
            Operation::UpdateDataModel(op) => &op.surface_id,
            Operation::DeleteSurface(op) => &op.surface_id,
        }
    }

    /// The operation name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateSurface(_) => "createSurface",
            Operation::UpdateComponents(_) => "updateComponents",
            Operation::UpdateDataModel(_) => "updateDataModel",
            Operation::DeleteSurface(_) => "deleteSurface",
        }
    }
}

/// Payload of `createSurface`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateSurface {
    /// Target surface id.
    #[serde(rename = "surfaceId")]
    pub surface_id: String,
    /// Widget vocabulary identifier.
    #[serde(rename = "catalogId", default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    /// Opaque theme blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,
    /// Whether the host should report the data model back to the agent.
    #[serde(rename = "sendDataModel", default)]
    pub send_data_model: bool,
}

/// Payload of `updateComponents`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateComponents {
    /// Target surface id.
    #[serde(rename = "surfaceId")]
    pub surface_id: String,
    /// Component definitions to upsert, in order.
    pub components: Vec<ComponentDef>,
}

/// Payload of `updateDataModel`.
///
/// `value` carries presence information: an omitted `value` key means delete
/// at `path`, while an explicit `null` writes a JSON null. The two must not
/// be conflated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateDataModel {
    /// Target surface id.
    #[serde(rename = "surfaceId")]
    pub surface_id: String,
    /// Target path; the root (`/`) when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Value to write; `None` only when the key was absent on the wire.
    #[serde(
        default,
        deserialize_with = "explicit_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

/// Payload of `deleteSurface`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteSurface {
    /// Target surface id.
    #[serde(rename = "surfaceId")]
    pub surface_id: String,
}

/// Keep an explicit JSON `null` distinct from an absent key: this runs only
/// when the key is present, so `null` becomes `Some(Value::Null)` while a
/// missing key falls back to the `None` default.
fn explicit_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}
