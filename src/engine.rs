use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{HANDLE_SIZE, MIN_LINE_WIDTH};
use crate::geom::{self, Handle, Point};
use crate::input::{Cursor, GestureState, StyleEdit, UiState};
use crate::persist::{ShapeStorage, StorageError, WebStorage};
use crate::render;
use crate::shape::{Draft, Shape, ShapeId, ShapeKind, ShapeStore, Style};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host shell to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The canvas cursor should change.
    SetCursor(Cursor),
    /// Visible state changed; the scene must be redrawn.
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies. Owns the shape store exclusively; the renderer only reads it.
#[derive(Default)]
pub struct EngineCore {
    pub store: ShapeStore,
    pub ui: UiState,
    pub gesture: GestureState,
    /// The in-progress draw, if any. Kept out of the store so it is never
    /// persisted, hit-tested or selectable.
    pub pending: Option<Draft>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Pointer events ---

    /// Pointer-down: start a resize, drag, or draw gesture.
    ///
    /// Shapes are hit-tested topmost-first. A hit on a handle of the already
    /// selected shape toggles resizing; a hit on any shape body selects it
    /// and starts a drag; empty space clears the selection and starts a draw.
    pub fn on_pointer_down(&mut self, p: Point) -> Vec<Action> {
        if let Some(id) = self.shape_at(p) {
            if self.ui.selected_id == Some(id) {
                if let Some(shape) = self.store.get(&id) {
                    if let Some(handle) = geom::handle_near(shape, p, HANDLE_SIZE) {
                        self.gesture = match self.gesture {
                            GestureState::Resizing { id: active, handle: active_handle }
                                if active == id && active_handle == handle =>
                            {
                                GestureState::Idle
                            }
                            _ => GestureState::Resizing { id, handle },
                        };
                        return Vec::new();
                    }
                }
            }

            let Some(shape) = self.store.get(&id) else {
                return Vec::new();
            };
            let selection_changed = self.ui.selected_id != Some(id);
            self.ui.selected_id = Some(id);
            self.gesture = GestureState::Dragging {
                id,
                offset: Point::new(p.x - shape.x, p.y - shape.y),
            };
            if selection_changed {
                vec![Action::RenderNeeded]
            } else {
                Vec::new()
            }
        } else {
            let had_selection = self.ui.selected_id.take().is_some();
            self.gesture = GestureState::Drawing { start: p };
            if had_selection {
                vec![Action::RenderNeeded]
            } else {
                Vec::new()
            }
        }
    }

    /// Pointer-move: update the cursor and advance the active gesture.
    pub fn on_pointer_move(&mut self, p: Point) -> Vec<Action> {
        let mut actions = vec![Action::SetCursor(self.cursor_at(p))];

        match self.gesture {
            GestureState::Dragging { id, offset } => {
                let moved = self.store.update(&id, |shape| {
                    shape.x = p.x - offset.x;
                    shape.y = p.y - offset.y;
                });
                if moved {
                    actions.push(Action::RenderNeeded);
                }
            }
            GestureState::Drawing { start } => {
                self.pending = Some(Draft {
                    kind: self.ui.tool,
                    x: start.x,
                    y: start.y,
                    w: p.x - start.x,
                    h: p.y - start.y,
                    style: self.ui.style.clone(),
                });
                actions.push(Action::RenderNeeded);
            }
            GestureState::Resizing { id, handle } => {
                if self.resize_to(&id, handle, p) {
                    actions.push(Action::RenderNeeded);
                }
            }
            GestureState::Idle => {}
        }

        actions
    }

    /// Pointer-up: finish the active gesture and return to idle.
    ///
    /// A draw gesture commits its draft, if one exists; a pointer-up without
    /// pointer-move never created a draft, so a zero-length drag discards
    /// silently.
    pub fn on_pointer_up(&mut self, _p: Point) -> Vec<Action> {
        match std::mem::take(&mut self.gesture) {
            GestureState::Drawing { .. } => {
                if let Some(draft) = self.pending.take() {
                    self.store.commit(draft);
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            GestureState::Dragging { .. } | GestureState::Resizing { .. } | GestureState::Idle => {
                Vec::new()
            }
        }
    }

    /// Click: refresh the selection from the shape under the point.
    ///
    /// Uses the same topmost-first hit-test as pointer-down, so the two paths
    /// can never rank overlapping shapes differently.
    pub fn on_click(&mut self, p: Point) -> Vec<Action> {
        let hit = self.shape_at(p);
        if self.ui.selected_id == hit {
            Vec::new()
        } else {
            self.ui.selected_id = hit;
            vec![Action::RenderNeeded]
        }
    }

    // --- Toolbar operations ---

    /// Set the shape kind the next draw gesture creates.
    pub fn set_tool(&mut self, tool: ShapeKind) {
        self.ui.tool = tool;
    }

    /// Apply a single style field edit to the pending style and, if a shape
    /// is selected, to that shape in place.
    pub fn apply_style(&mut self, edit: &StyleEdit) -> Vec<Action> {
        apply_edit(&mut self.ui.style, edit);
        if let Some(id) = self.ui.selected_id {
            if self.store.update(&id, |shape| apply_edit(&mut shape.style, edit)) {
                return vec![Action::RenderNeeded];
            }
        }
        Vec::new()
    }

    /// Delete the selected shape. A no-op without a selection or when the
    /// user declined the confirmation.
    pub fn delete_selected(&mut self, confirmed: bool) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        if !confirmed {
            return Vec::new();
        }
        self.store.remove(&id);
        self.ui.selected_id = None;
        vec![Action::RenderNeeded]
    }

    /// Replace the drawing with a loaded snapshot.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) -> Vec<Action> {
        self.store.load_snapshot(shapes);
        self.ui.selected_id = None;
        self.gesture = GestureState::Idle;
        self.pending = None;
        vec![Action::RenderNeeded]
    }

    /// Clear the drawing entirely.
    pub fn clear_all(&mut self) -> Vec<Action> {
        self.load_snapshot(Vec::new())
    }

    // --- Queries ---

    /// The currently selected shape id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }

    /// The committed shapes in paint order, for persistence.
    #[must_use]
    pub fn snapshot(&self) -> &[Shape] {
        self.store.shapes()
    }

    // --- Internals ---

    /// Topmost committed shape under `p`, if any. The pending draft is not in
    /// the store and therefore never hit.
    fn shape_at(&self, p: Point) -> Option<ShapeId> {
        self.store
            .shapes()
            .iter()
            .rev()
            .find(|shape| geom::is_inside(shape, p.x, p.y))
            .map(|shape| shape.id)
    }

    fn cursor_at(&self, p: Point) -> Cursor {
        if let Some(id) = self.ui.selected_id {
            if let Some(shape) = self.store.get(&id) {
                if geom::handle_near(shape, p, HANDLE_SIZE / 2.0).is_some() {
                    return Cursor::NwseResize;
                }
            }
        }
        if self.store.shapes().iter().any(|shape| geom::is_inside(shape, p.x, p.y)) {
            Cursor::Move
        } else {
            Cursor::Default
        }
    }

    /// Recompute the shape's extent so the dragged handle tracks the pointer.
    ///
    /// Every handle resizes from the anchor, except a line's `Start` handle,
    /// which moves the anchor itself and keeps the far endpoint fixed, so the
    /// two line handles act as independently draggable endpoints.
    fn resize_to(&mut self, id: &ShapeId, handle: Handle, p: Point) -> bool {
        match handle {
            Handle::Start => {
                let far = self
                    .store
                    .get(id)
                    .map(|shape| (shape.x + shape.w, shape.y + shape.h));
                let Some((far_x, far_y)) = far else {
                    return false;
                };
                self.store.update(id, |shape| {
                    shape.x = p.x;
                    shape.y = p.y;
                    shape.w = far_x - p.x;
                    shape.h = far_y - p.y;
                })
            }
            Handle::BottomRight | Handle::Edge | Handle::End => self.store.update(id, |shape| {
                shape.w = p.x - shape.x;
                shape.h = p.y - shape.y;
            }),
        }
    }
}

fn apply_edit(style: &mut Style, edit: &StyleEdit) {
    match edit {
        StyleEdit::Stroke(color) => style.stroke = color.clone(),
        StyleEdit::Fill(color) => style.fill = color.clone(),
        StyleEdit::LineWidth(width) => style.line_width = width.max(MIN_LINE_WIDTH),
        StyleEdit::LineStyle(line_style) => style.line_style = *line_style,
    }
}

/// The full drawing engine. Wraps [`EngineCore`] and owns the browser canvas
/// element and the storage backend.
pub struct Engine {
    canvas: HtmlCanvasElement,
    storage: WebStorage,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to the given canvas element, persisting to the
    /// window's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns an error when browser storage is unavailable.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, StorageError> {
        Ok(Self {
            canvas,
            storage: WebStorage::from_window()?,
            core: EngineCore::new(),
        })
    }

    /// Restore the saved drawing, if any, and draw the first frame.
    ///
    /// A malformed payload is logged and discarded; the drawing starts empty.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the initial render fails.
    pub fn load_initial(&mut self) -> Result<(), JsValue> {
        match self.storage.load() {
            Ok(Some(shapes)) => {
                self.core.load_snapshot(shapes);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "discarding malformed saved drawing");
            }
        }
        self.render()
    }

    // --- Input events (canvas-local coordinates) ---

    /// # Errors
    ///
    /// Returns `Err` if applying the resulting actions fails.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_pointer_down(Point::new(x, y));
        self.process(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if applying the resulting actions fails.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_pointer_move(Point::new(x, y));
        self.process(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if applying the resulting actions fails.
    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_pointer_up(Point::new(x, y));
        self.process(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if applying the resulting actions fails.
    pub fn on_click(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_click(Point::new(x, y));
        self.process(&actions)
    }

    // --- Toolbar operations ---

    /// Set the active drawing tool.
    pub fn set_tool(&mut self, tool: ShapeKind) {
        self.core.set_tool(tool);
    }

    /// Apply a style field edit.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn apply_style(&mut self, edit: &StyleEdit) -> Result<(), JsValue> {
        let actions = self.core.apply_style(edit);
        self.process(&actions)
    }

    /// Delete the selected shape after asking the user to confirm.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn delete_selected(&mut self) -> Result<(), JsValue> {
        if self.core.selection().is_none() {
            return Ok(());
        }
        let confirmed = web_sys::window()
            .map(|window| {
                window
                    .confirm_with_message("Are you sure you want to delete this shape?")
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        let actions = self.core.delete_selected(confirmed);
        self.process(&actions)
    }

    /// Persist the current drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend rejects the write.
    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save(self.core.snapshot())
    }

    /// Delete the persisted drawing and clear the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the delete or the redraw fails.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.storage.clear()?;
        let actions = self.core.clear_all();
        self.process(&actions)
    }

    // --- Viewport ---

    /// Re-derive the canvas pixel buffer from its on-screen layout, then
    /// redraw. Without this, buffer and layout sizes desync and all
    /// coordinates drift.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn resize_to_fit(&mut self) -> Result<(), JsValue> {
        let rect = self.canvas.get_bounding_client_rect();
        self.canvas.set_width(rect.width() as u32);
        self.canvas.set_height(rect.height() as u32);
        self.render()
    }

    // --- Internals ---

    fn process(&self, actions: &[Action]) -> Result<(), JsValue> {
        for action in actions {
            match action {
                Action::SetCursor(cursor) => {
                    self.canvas.style().set_property("cursor", cursor.as_css())?;
                }
                Action::RenderNeeded => self.render()?,
            }
        }
        Ok(())
    }

    fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(
            &ctx,
            &self.core.store,
            self.core.pending.as_ref(),
            &self.core.ui,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }
}
