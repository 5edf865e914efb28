//! Rendering: draws the full scene to a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives read-only views of the
//! shape store, the pending draft, and the UI state, and mutates no
//! application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`;
//! the top-level caller ([`crate::engine::Engine`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::HANDLE_SIZE;
use crate::geom;
use crate::input::UiState;
use crate::shape::{Draft, LineStyle, Shape, ShapeKind, ShapeStore, Style};

/// Selection highlight color.
const SELECTION_COLOR: &str = "blue";
/// Gap between a shape's bounds and its selection outline, in pixels.
const SELECTION_OFFSET: f64 = 2.0;
/// Stroke width of the selection outline.
const SELECTION_LINE_WIDTH: f64 = 0.5;
/// Dash/gap lengths for dashed strokes, in pixels.
const DASH_PATTERN: [f64; 2] = [5.0, 3.0];

/// Draw the full scene: committed shapes in paint order, selection UI, and
/// the pending draft on top.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    store: &ShapeStore,
    pending: Option<&Draft>,
    ui: &UiState,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, width, height);

    for shape in store.shapes() {
        paint_shape(ctx, shape.kind, shape.x, shape.y, shape.w, shape.h, &shape.style)?;
        if ui.selected_id == Some(shape.id) {
            paint_selection(ctx, shape)?;
        }
    }

    // The in-progress draw paints last, never with selection UI.
    if let Some(draft) = pending {
        paint_shape(ctx, draft.kind, draft.x, draft.y, draft.w, draft.h, &draft.style)?;
    }

    Ok(())
}

fn paint_shape(
    ctx: &CanvasRenderingContext2d,
    kind: ShapeKind,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    style: &Style,
) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.set_line_width(style.line_width);
    set_dash(ctx, style.line_style)?;
    ctx.set_stroke_style_str(&style.stroke);
    ctx.set_fill_style_str(&style.fill);

    match kind {
        ShapeKind::Rectangle => {
            ctx.rect(x, y, w, h);
            ctx.fill();
            ctx.stroke();
        }
        ShapeKind::Circle => {
            ctx.ellipse(
                x + w / 2.0,
                y + h / 2.0,
                (w / 2.0).abs(),
                (h / 2.0).abs(),
                0.0,
                0.0,
                2.0 * PI,
            )?;
            ctx.fill();
            ctx.stroke();
        }
        ShapeKind::Line => {
            ctx.move_to(x, y);
            ctx.line_to(x + w, y + h);
            ctx.stroke();
        }
    }

    ctx.close_path();
    Ok(())
}

/// Highlight outline plus filled square handles for the selected shape.
fn paint_selection(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.set_line_width(SELECTION_LINE_WIDTH);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.set_stroke_style_str(SELECTION_COLOR);

    match shape.kind {
        ShapeKind::Circle => {
            ctx.ellipse(
                shape.x + shape.w / 2.0,
                shape.y + shape.h / 2.0,
                (shape.w / 2.0).abs() + SELECTION_OFFSET,
                (shape.h / 2.0).abs() + SELECTION_OFFSET,
                0.0,
                0.0,
                2.0 * PI,
            )?;
            ctx.stroke();
        }
        ShapeKind::Rectangle | ShapeKind::Line => {
            ctx.stroke_rect(
                shape.x - SELECTION_OFFSET,
                shape.y - SELECTION_OFFSET,
                shape.w + SELECTION_OFFSET * 2.0,
                shape.h + SELECTION_OFFSET * 2.0,
            );
        }
    }
    ctx.close_path();

    ctx.set_fill_style_str(SELECTION_COLOR);
    for (_, center) in geom::handles(shape) {
        ctx.fill_rect(
            center.x - HANDLE_SIZE / 2.0,
            center.y - HANDLE_SIZE / 2.0,
            HANDLE_SIZE,
            HANDLE_SIZE,
        );
    }

    Ok(())
}

fn set_dash(ctx: &CanvasRenderingContext2d, line_style: LineStyle) -> Result<(), JsValue> {
    let segments = js_sys::Array::new();
    if line_style == LineStyle::Dashed {
        for segment in DASH_PATTERN {
            segments.push(&segment.into());
        }
    }
    ctx.set_line_dash(&segments)
}
