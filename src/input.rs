//! Input model: UI state, cursor shapes, style edits, and the gesture state
//! machine.
//!
//! `GestureState` is the active gesture being tracked between pointer-down
//! and pointer-up. Exactly one state is active at a time; each variant
//! carries the context needed to resume `Idle` on release, so invalid
//! combinations such as dragging-while-resizing cannot be represented.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Handle, Point};
use crate::shape::{LineStyle, ShapeId, ShapeKind, Style};

/// Mouse cursor the canvas should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Nothing under the pointer.
    Default,
    /// Hovering a shape body.
    Move,
    /// Hovering a resize handle of the selected shape.
    NwseResize,
}

impl Cursor {
    /// The CSS cursor keyword for this cursor.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Move => "move",
            Self::NwseResize => "nwse-resize",
        }
    }
}

/// A single style field change from the toolbar.
///
/// Applied to the pending style (used by future shapes) and, when a shape is
/// selected, to that one field of its style in place.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEdit {
    Stroke(String),
    Fill(String),
    LineWidth(f64),
    LineStyle(LineStyle),
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Shape kind the next draw gesture creates.
    pub tool: ShapeKind,
    /// The id of the currently selected shape, if any.
    pub selected_id: Option<ShapeId>,
    /// Pending style snapshot applied to newly drawn shapes.
    pub style: Style,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: ShapeKind::Rectangle,
            selected_id: None,
            style: Style::default(),
        }
    }
}

/// The gesture state machine driven by pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging out a new shape from a fixed start corner.
    Drawing {
        /// Where the drag started; the draft's anchor.
        start: Point,
    },
    /// The user is moving an existing shape across the canvas.
    Dragging {
        /// Id of the shape being dragged.
        id: ShapeId,
        /// Pointer position minus shape anchor at pointer-down, so the anchor
        /// tracks `pointer - offset`.
        offset: Point,
    },
    /// The user is resizing the selected shape by one of its handles.
    Resizing {
        /// Id of the shape being resized.
        id: ShapeId,
        /// Which handle is being dragged.
        handle: Handle,
    },
}
