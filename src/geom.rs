#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use crate::consts::LINE_HIT_TOLERANCE;
use crate::shape::{Shape, ShapeKind};

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Resize handle positions, per shape kind.
///
/// Rectangles expose `BottomRight`, circles `Edge`, lines `Start` and `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    BottomRight,
    Edge,
    Start,
    End,
}

/// Test whether `(x, y)` hits `shape`.
///
/// Lines hit within [`LINE_HIT_TOLERANCE`] of the infinite line through their
/// endpoints; the test does not clip to the segment.
/// A zero-length line never hits. Rectangle and circle tests normalize
/// negative extents, boundary inclusive.
#[must_use]
pub fn is_inside(shape: &Shape, x: f64, y: f64) -> bool {
    match shape.kind {
        ShapeKind::Line => {
            let (x1, y1) = (shape.x, shape.y);
            let (x2, y2) = (shape.x + shape.w, shape.y + shape.h);
            let length = (y2 - y1).hypot(x2 - x1);
            if length == 0.0 {
                return false;
            }
            let distance = ((y2 - y1) * x - (x2 - x1) * y + x2 * y1 - y2 * x1).abs() / length;
            distance < LINE_HIT_TOLERANCE
        }
        ShapeKind::Circle => {
            let center_x = shape.x + shape.w / 2.0;
            let center_y = shape.y + shape.h / 2.0;
            let radius_x = (shape.w / 2.0).abs();
            let radius_y = (shape.h / 2.0).abs();
            let dx = x - center_x;
            let dy = y - center_y;
            (dx * dx) / (radius_x * radius_x) + (dy * dy) / (radius_y * radius_y) <= 1.0
        }
        ShapeKind::Rectangle => {
            let left = shape.x.min(shape.x + shape.w);
            let right = shape.x.max(shape.x + shape.w);
            let top = shape.y.min(shape.y + shape.h);
            let bottom = shape.y.max(shape.y + shape.h);
            x >= left && x <= right && y >= top && y <= bottom
        }
    }
}

/// The handle positions for `shape`, in a fixed per-kind order.
///
/// Deterministic and side-effect-free; every hit-test and render pass must
/// agree on these positions.
#[must_use]
pub fn handles(shape: &Shape) -> Vec<(Handle, Point)> {
    match shape.kind {
        ShapeKind::Rectangle => vec![(
            Handle::BottomRight,
            Point::new(shape.x + shape.w, shape.y + shape.h),
        )],
        ShapeKind::Circle => {
            let center_x = shape.x + shape.w / 2.0;
            let center_y = shape.y + shape.h / 2.0;
            let radius_x = (shape.w / 2.0).abs();
            let radius_y = (shape.h / 2.0).abs();
            // Boundary point along the drag direction from center.
            let angle = shape.h.atan2(shape.w);
            vec![(
                Handle::Edge,
                Point::new(
                    center_x + radius_x * angle.cos(),
                    center_y + radius_y * angle.sin(),
                ),
            )]
        }
        ShapeKind::Line => vec![
            (Handle::Start, Point::new(shape.x, shape.y)),
            (Handle::End, Point::new(shape.x + shape.w, shape.y + shape.h)),
        ],
    }
}

/// The first handle of `shape` whose center is within `tolerance` of `point`
/// on both axes, if any.
#[must_use]
pub fn handle_near(shape: &Shape, point: Point, tolerance: f64) -> Option<Handle> {
    handles(shape)
        .into_iter()
        .find(|(_, center)| (point.x - center.x).abs() < tolerance && (point.y - center.y).abs() < tolerance)
        .map(|(handle, _)| handle)
}
