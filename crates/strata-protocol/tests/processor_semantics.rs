//! End-to-end processor semantics: lifecycle, idempotence, delta ingestion,
//! and the omission-deletes rule.

use serde_json::json;
use strata_protocol::SurfaceProcessor;

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_snapshot_end_to_end() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_snapshot(&json!({"operations": [
        {"createSurface": {"surfaceId": "s1"}},
        {"updateComponents": {"surfaceId": "s1", "components": [
            {"id": "root", "component": "Text", "text": "Hi"}
        ]}},
        {"updateDataModel": {"surfaceId": "s1", "path": "/n", "value": 5}},
        {"deleteSurface": {"surfaceId": "s1"}}
    ]}));

    assert_eq!(processor.len(), 0);
    assert!(processor.surface("s1").is_none());
    assert!(processor.data_store("s1").is_none());
}

#[test]
fn test_implicit_surface_creation_by_data_update() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_value(&json!({
        "updateDataModel": {"surfaceId": "fresh", "path": "/greeting", "value": "hello"}
    }));

    let store = processor.data_store("fresh").unwrap();
    assert_eq!(store.get_string("/greeting").as_deref(), Some("hello"));
}

#[test]
fn test_surface_state_after_full_flow() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_snapshot(&json!({"operations": [
        {"createSurface": {"surfaceId": "s1", "catalogId": "material",
                           "theme": {"dark": true}, "sendDataModel": true}},
        {"updateComponents": {"surfaceId": "s1", "components": [
            {"id": "root", "component": "Column", "children": ["title"]},
            {"id": "title", "component": "Text", "text": {"path": "/title"}, "weight": 1}
        ]}},
        {"updateDataModel": {"surfaceId": "s1", "path": "/title", "value": "Welcome"}}
    ]}));

    let surface = processor.surface("s1").unwrap();
    assert_eq!(surface.catalog_id(), Some("material"));
    assert_eq!(surface.theme(), Some(&json!({"dark": true})));
    assert!(surface.send_data_model());
    assert_eq!(surface.len(), 2);

    let root = surface.root_component().unwrap();
    assert_eq!(root.component_type, "Column");

    let title = surface.component("title").unwrap();
    assert_eq!(title.weight, Some(1.0));
    assert_eq!(title.properties["text"], json!({"path": "/title"}));
    assert_eq!(surface.store().get_string("/title").as_deref(), Some("Welcome"));
}

// ============================================================================
// Idempotence and replacement
// ============================================================================

#[test]
fn test_update_components_idempotent() {
    let op = json!({"updateComponents": {"surfaceId": "s1", "components": [
        {"id": "root", "component": "Row", "gap": 8},
        {"id": "a", "component": "Text", "text": "x"}
    ]}});

    let mut processor = SurfaceProcessor::new();
    processor.apply_value(&op);
    let once: Vec<_> = {
        let surface = processor.surface("s1").unwrap();
        let mut ids: Vec<_> = surface.component_ids().map(str::to_owned).collect();
        ids.sort();
        ids
    };

    processor.apply_value(&op);
    let surface = processor.surface("s1").unwrap();
    let mut twice: Vec<_> = surface.component_ids().map(str::to_owned).collect();
    twice.sort();

    assert_eq!(once, twice);
    assert_eq!(surface.component("root").unwrap().properties["gap"], json!(8));
}

#[test]
fn test_component_replacement_not_merge() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_value(&json!({"updateComponents": {"surfaceId": "s1", "components": [
        {"id": "root", "component": "Text", "text": "old", "color": "red"}
    ]}}));
    processor.apply_value(&json!({"updateComponents": {"surfaceId": "s1", "components": [
        {"id": "root", "component": "Text", "text": "new"}
    ]}}));

    let root = processor.surface("s1").unwrap().root_component().unwrap();
    assert_eq!(root.properties["text"], json!("new"));
    assert!(root.properties.get("color").is_none());
}

// ============================================================================
// Omission-deletes rule
// ============================================================================

#[test]
fn test_value_omission_deletes_key() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_value(&json!({
        "updateDataModel": {"surfaceId": "s1", "path": "/x", "value": "a"}
    }));
    processor.apply_value(&json!({
        "updateDataModel": {"surfaceId": "s1", "path": "/x"}
    }));

    let store = processor.data_store("s1").unwrap();
    assert!(store.get_string("/x").is_none());
    assert!(store.get("/x").is_none());
}

#[test]
fn test_explicit_null_is_a_write_not_a_delete() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_value(&json!({
        "updateDataModel": {"surfaceId": "s1", "path": "/x", "value": "a"}
    }));
    processor.apply_value(&json!({
        "updateDataModel": {"surfaceId": "s1", "path": "/x", "value": null}
    }));

    let store = processor.data_store("s1").unwrap();
    assert_eq!(store.get("/x"), Some(json!(null)));
}

#[test]
fn test_default_path_is_root() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_value(&json!({
        "updateDataModel": {"surfaceId": "s1", "value": {"seeded": true}}
    }));

    let store = processor.data_store("s1").unwrap();
    assert_eq!(store.get_bool("/seeded"), Some(true));

    // Root update with a container replaces the whole tree.
    processor.apply_value(&json!({
        "updateDataModel": {"surfaceId": "s1", "value": {"other": 1}}
    }));
    let store = processor.data_store("s1").unwrap();
    assert!(store.get("/seeded").is_none());
}

// ============================================================================
// Delta ingestion
// ============================================================================

#[test]
fn test_delta_matches_snapshot_semantics() {
    let op = json!({"updateDataModel": {"surfaceId": "s1", "path": "/n", "value": 7}});

    let mut snapshotted = SurfaceProcessor::new();
    snapshotted.apply_snapshot(&json!({"operations": [op]}));

    let mut patched = SurfaceProcessor::new();
    patched.apply_delta(&json!([
        {"op": "add", "path": "/operations/0", "value": op}
    ]));

    assert_eq!(
        snapshotted.data_store("s1").unwrap().get_number("/n"),
        patched.data_store("s1").unwrap().get_number("/n"),
    );
}

#[test]
fn test_delta_ignores_non_add_entries() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_delta(&json!([
        {"op": "test", "path": "/operations/0", "value": {"createSurface": {"surfaceId": "a"}}},
        {"op": "copy", "from": "/operations/0", "path": "/operations/1"},
        {"op": "add", "path": "/operations/2", "value": {"createSurface": {"surfaceId": "b"}}}
    ]));

    assert_eq!(processor.len(), 1);
    assert!(processor.surface("b").is_some());
}

// ============================================================================
// Tolerance
// ============================================================================

#[test]
fn test_heterogeneous_stream_never_fails() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_snapshot(&json!({"operations": [
        {"futureOperation": {"surfaceId": "s1"}},
        "not even an object",
        {"updateComponents": {"surfaceId": "s1", "components": [
            {"component": "Text"}
        ]}},
        {"createSurface": {"surfaceId": "s1", "unknownFlag": true}}
    ]}));

    // Only the final, well-formed createSurface took effect.
    assert_eq!(processor.len(), 1);
    assert!(processor.surface("s1").unwrap().is_empty());
}

#[test]
fn test_snapshot_without_operations_is_noop() {
    let mut processor = SurfaceProcessor::new();
    processor.apply_snapshot(&json!({"unrelated": true}));
    processor.apply_snapshot(&json!({"operations": "not an array"}));
    assert!(processor.is_empty());
}
