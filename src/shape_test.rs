#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn draft(kind: ShapeKind) -> Draft {
    Draft {
        kind,
        x: 10.0,
        y: 20.0,
        w: 100.0,
        h: 50.0,
        style: Style::default(),
    }
}

fn committed(store: &mut ShapeStore, kind: ShapeKind) -> ShapeId {
    store.commit(draft(kind))
}

// =============================================================
// ShapeKind serde
// =============================================================

#[test]
fn kind_serializes_lowercase() {
    let cases = [
        (ShapeKind::Rectangle, "\"rectangle\""),
        (ShapeKind::Circle, "\"circle\""),
        (ShapeKind::Line, "\"line\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
    }
}

#[test]
fn kind_deserialize_roundtrip() {
    let json = serde_json::to_string(&ShapeKind::Circle).unwrap();
    let back: ShapeKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ShapeKind::Circle);
}

#[test]
fn kind_deserialize_invalid_rejects() {
    assert!(serde_json::from_str::<ShapeKind>("\"triangle\"").is_err());
}

// =============================================================
// Style
// =============================================================

#[test]
fn style_default_matches_toolbar_defaults() {
    let style = Style::default();
    assert_eq!(style.stroke, "#000000");
    assert_eq!(style.fill, "#cccccc");
    assert_eq!(style.line_width, 2.0);
    assert_eq!(style.line_style, LineStyle::Solid);
}

#[test]
fn style_serializes_camel_case_field_names() {
    let serialized = serde_json::to_string(&Style::default()).unwrap();
    assert!(serialized.contains("\"lineWidth\":2.0"));
    assert!(serialized.contains("\"lineStyle\":\"solid\""));
    assert!(!serialized.contains("line_width"));
}

#[test]
fn line_style_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&LineStyle::Dashed).unwrap(), "\"dashed\"");
    assert_eq!(serde_json::to_string(&LineStyle::Solid).unwrap(), "\"solid\"");
}

// =============================================================
// Shape serde
// =============================================================

#[test]
fn shape_kind_serializes_as_type_field() {
    let mut store = ShapeStore::new();
    let id = committed(&mut store, ShapeKind::Rectangle);
    let serialized = serde_json::to_string(store.get(&id).unwrap()).unwrap();
    assert!(serialized.contains("\"type\":\"rectangle\""));
    assert!(!serialized.contains("\"kind\""));
}

#[test]
fn shape_serde_roundtrip() {
    let shape = Shape {
        id: Uuid::nil(),
        kind: ShapeKind::Line,
        x: 1.5,
        y: -2.0,
        w: 30.0,
        h: -40.0,
        style: Style {
            stroke: "#ff0000".to_owned(),
            fill: "#00ff00".to_owned(),
            line_width: 3.0,
            line_style: LineStyle::Dashed,
        },
    };
    let serialized = serde_json::to_string(&shape).unwrap();
    let back: Shape = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back, shape);
}

#[test]
fn shape_deserializes_persisted_format() {
    let raw = r##"{
        "id": "00000000-0000-0000-0000-000000000001",
        "type": "circle",
        "x": 10.0, "y": 20.0, "w": 100.0, "h": 50.0,
        "style": {"stroke": "#000000", "fill": "#cccccc", "lineWidth": 2.0, "lineStyle": "solid"}
    }"##;
    let shape: Shape = serde_json::from_str(raw).unwrap();
    assert_eq!(shape.kind, ShapeKind::Circle);
    assert_eq!(shape.x, 10.0);
    assert_eq!(shape.style.line_width, 2.0);
}

// =============================================================
// ShapeStore: commit
// =============================================================

#[test]
fn store_new_is_empty() {
    let store = ShapeStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn commit_appends_and_returns_id() {
    let mut store = ShapeStore::new();
    let id = committed(&mut store, ShapeKind::Rectangle);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id).unwrap().id, id);
}

#[test]
fn commit_preserves_geometry_and_style() {
    let mut store = ShapeStore::new();
    let d = Draft {
        kind: ShapeKind::Circle,
        x: 1.0,
        y: 2.0,
        w: -3.0,
        h: 4.0,
        style: Style { stroke: "#abcdef".to_owned(), ..Style::default() },
    };
    let id = store.commit(d.clone());
    let shape = store.get(&id).unwrap();
    assert_eq!(shape.kind, d.kind);
    assert_eq!(shape.x, d.x);
    assert_eq!(shape.y, d.y);
    assert_eq!(shape.w, d.w);
    assert_eq!(shape.h, d.h);
    assert_eq!(shape.style, d.style);
}

#[test]
fn commit_assigns_unique_ids() {
    let mut store = ShapeStore::new();
    let a = committed(&mut store, ShapeKind::Rectangle);
    let b = committed(&mut store, ShapeKind::Rectangle);
    assert_ne!(a, b);
}

#[test]
fn commit_order_is_paint_order() {
    let mut store = ShapeStore::new();
    let a = committed(&mut store, ShapeKind::Rectangle);
    let b = committed(&mut store, ShapeKind::Circle);
    let c = committed(&mut store, ShapeKind::Line);
    let order: Vec<ShapeId> = store.shapes().iter().map(|s| s.id).collect();
    assert_eq!(order, vec![a, b, c]);
}

// =============================================================
// ShapeStore: update
// =============================================================

#[test]
fn update_mutates_in_place() {
    let mut store = ShapeStore::new();
    let id = committed(&mut store, ShapeKind::Rectangle);
    assert!(store.update(&id, |shape| {
        shape.x = 99.0;
        shape.w = -5.0;
    }));
    let shape = store.get(&id).unwrap();
    assert_eq!(shape.x, 99.0);
    assert_eq!(shape.w, -5.0);
}

#[test]
fn update_missing_id_returns_false() {
    let mut store = ShapeStore::new();
    assert!(!store.update(&Uuid::new_v4(), |shape| shape.x = 1.0));
}

#[test]
fn update_keeps_paint_order() {
    let mut store = ShapeStore::new();
    let a = committed(&mut store, ShapeKind::Rectangle);
    let b = committed(&mut store, ShapeKind::Circle);
    store.update(&a, |shape| shape.x = 500.0);
    assert_eq!(store.shapes()[0].id, a);
    assert_eq!(store.shapes()[1].id, b);
}

// =============================================================
// ShapeStore: remove / clear / load_snapshot
// =============================================================

#[test]
fn remove_returns_shape_and_shrinks() {
    let mut store = ShapeStore::new();
    let id = committed(&mut store, ShapeKind::Line);
    let removed = store.remove(&id);
    assert_eq!(removed.unwrap().id, id);
    assert!(store.is_empty());
}

#[test]
fn remove_missing_id_returns_none() {
    let mut store = ShapeStore::new();
    assert!(store.remove(&Uuid::new_v4()).is_none());
}

#[test]
fn remove_preserves_other_shapes_order() {
    let mut store = ShapeStore::new();
    let a = committed(&mut store, ShapeKind::Rectangle);
    let b = committed(&mut store, ShapeKind::Circle);
    let c = committed(&mut store, ShapeKind::Line);
    store.remove(&b);
    let order: Vec<ShapeId> = store.shapes().iter().map(|s| s.id).collect();
    assert_eq!(order, vec![a, c]);
}

#[test]
fn clear_empties_store() {
    let mut store = ShapeStore::new();
    committed(&mut store, ShapeKind::Rectangle);
    committed(&mut store, ShapeKind::Circle);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn load_snapshot_replaces_contents_in_order() {
    let mut store = ShapeStore::new();
    let stale = committed(&mut store, ShapeKind::Rectangle);

    let mut source = ShapeStore::new();
    let a = committed(&mut source, ShapeKind::Circle);
    let b = committed(&mut source, ShapeKind::Line);
    store.load_snapshot(source.shapes().to_vec());

    assert!(store.get(&stale).is_none());
    let order: Vec<ShapeId> = store.shapes().iter().map(|s| s.id).collect();
    assert_eq!(order, vec![a, b]);
}

#[test]
fn load_snapshot_empty_clears() {
    let mut store = ShapeStore::new();
    committed(&mut store, ShapeKind::Rectangle);
    store.load_snapshot(Vec::new());
    assert!(store.is_empty());
}
