use uuid::Uuid;

use super::*;
use crate::shape::{Shape, ShapeKind, Style};

fn sample_shapes() -> Vec<Shape> {
    vec![
        Shape {
            id: Uuid::new_v4(),
            kind: ShapeKind::Rectangle,
            x: 10.0,
            y: 20.0,
            w: 100.0,
            h: 50.0,
            style: Style::default(),
        },
        Shape {
            id: Uuid::new_v4(),
            kind: ShapeKind::Line,
            x: 0.0,
            y: 0.0,
            w: 80.0,
            h: -30.0,
            style: Style { stroke: "#ff0000".to_owned(), ..Style::default() },
        },
    ]
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn load_from_empty_storage_is_none() {
    let storage = MemoryStorage::new();
    assert!(storage.load().unwrap().is_none());
}

#[test]
fn save_then_load_restores_shapes() {
    let storage = MemoryStorage::new();
    let shapes = sample_shapes();
    storage.save(&shapes).unwrap();
    assert_eq!(storage.load().unwrap().unwrap(), shapes);
}

#[test]
fn save_replaces_previous_drawing() {
    let storage = MemoryStorage::new();
    storage.save(&sample_shapes()).unwrap();
    storage.save(&[]).unwrap();
    assert_eq!(storage.load().unwrap().unwrap(), Vec::<Shape>::new());
}

#[test]
fn clear_removes_payload() {
    let storage = MemoryStorage::new();
    storage.save(&sample_shapes()).unwrap();
    storage.clear().unwrap();
    assert!(storage.load().unwrap().is_none());
    assert!(storage.raw().is_none());
}

#[test]
fn clear_on_empty_storage_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.clear().is_ok());
}

// =============================================================
// Payload format
// =============================================================

#[test]
fn payload_is_plain_json_array() {
    let storage = MemoryStorage::new();
    storage.save(&sample_shapes()).unwrap();
    let raw = storage.raw().unwrap();
    assert!(raw.starts_with('['));
    assert!(raw.contains("\"type\":\"rectangle\""));
    assert!(raw.contains("\"lineWidth\""));
    assert!(raw.contains("\"lineStyle\":\"solid\""));
}

#[test]
fn empty_drawing_saves_as_empty_array() {
    let storage = MemoryStorage::new();
    storage.save(&[]).unwrap();
    assert_eq!(storage.raw().unwrap(), "[]");
}

#[test]
fn malformed_payload_is_a_payload_error() {
    let storage = MemoryStorage::new();
    storage.set_raw("not json");
    assert!(matches!(storage.load(), Err(StorageError::Payload(_))));
}

#[test]
fn wrong_shape_of_json_is_a_payload_error() {
    let storage = MemoryStorage::new();
    storage.set_raw(r#"{"shapes": []}"#);
    assert!(matches!(storage.load(), Err(StorageError::Payload(_))));

    storage.set_raw(r#"[{"type": "rectangle"}]"#); // missing fields
    assert!(matches!(storage.load(), Err(StorageError::Payload(_))));
}

// =============================================================
// Errors
// =============================================================

#[test]
fn storage_error_messages_are_stable() {
    assert_eq!(StorageError::Unavailable.to_string(), "browser storage is unavailable");
    assert_eq!(
        StorageError::Backend("quota".to_owned()).to_string(),
        "storage backend error: quota"
    );
}
