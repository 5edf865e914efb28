//! Shape model: committed shapes, their style, the draft for an in-progress
//! draw, and the ordered store that owns everything on the canvas.
//!
//! Paint order is insertion order: later shapes draw on top and are
//! hit-tested first. The store holds only committed shapes; the draft a user
//! is still dragging out lives in an `Option<Draft>` on the engine and is
//! therefore never persisted, hit-tested or selectable.
//!
//! Shapes serialize to the persisted JSON format verbatim:
//! `{id, type, x, y, w, h, style: {stroke, fill, lineWidth, lineStyle}}`.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a committed shape.
pub type ShapeId = Uuid;

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle spanned by the anchor and the signed extent.
    Rectangle,
    /// Ellipse inscribed within the bounding box.
    Circle,
    /// Straight line segment from the anchor to anchor + extent.
    Line,
}

/// Stroke dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Visual style shared by all shape kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Fill color as a CSS color string.
    pub fill: String,
    /// Stroke width in pixels, at least 1.
    #[serde(rename = "lineWidth")]
    pub line_width: f64,
    /// Solid or dashed stroke.
    #[serde(rename = "lineStyle")]
    pub line_style: LineStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: "#000000".to_owned(),
            fill: "#cccccc".to_owned(),
            line_width: 2.0,
            line_style: LineStyle::Solid,
        }
    }
}

/// A committed shape as stored and persisted.
///
/// `(x, y)` is the anchor corner (or line start point); `(w, h)` is a signed
/// extent recording the drag direction. Negative extents are valid and are
/// normalized where geometry needs a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique, stable identifier generated at commit time.
    pub id: ShapeId,
    /// Shape kind.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Anchor x in canvas pixels.
    pub x: f64,
    /// Anchor y in canvas pixels.
    pub y: f64,
    /// Signed horizontal extent.
    pub w: f64,
    /// Signed vertical extent.
    pub h: f64,
    /// Visual style.
    pub style: Style,
}

/// An uncommitted shape tracking an in-progress draw gesture.
///
/// Identical to [`Shape`] except it has no id yet; committing it assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub style: Style,
}

/// Ordered collection of committed shapes; the single source of truth for
/// what is rendered and hit-tested.
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Commit a draft: assign a fresh unique id, append in paint order, and
    /// return the new id.
    pub fn commit(&mut self, draft: Draft) -> ShapeId {
        let id = Uuid::new_v4();
        self.shapes.push(Shape {
            id,
            kind: draft.kind,
            x: draft.x,
            y: draft.y,
            w: draft.w,
            h: draft.h,
            style: draft.style,
        });
        id
    }

    /// Apply an in-place update to the shape with the given id. Returns false
    /// if no such shape exists.
    pub fn update(&mut self, id: &ShapeId, apply: impl FnOnce(&mut Shape)) -> bool {
        match self.shapes.iter_mut().find(|shape| shape.id == *id) {
            Some(shape) => {
                apply(shape);
                true
            }
            None => false,
        }
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|shape| shape.id == *id)?;
        Some(self.shapes.remove(index))
    }

    /// Return a reference to a shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == *id)
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Replace all shapes with a loaded snapshot, preserving its order.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// All shapes in paint order (first is drawn beneath the rest).
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of committed shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}
