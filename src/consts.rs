//! Shared numeric constants for the drawing engine.

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length in pixels of a resize handle; also the pointer-down hit slop
/// around a handle center.
pub const HANDLE_SIZE: f64 = 8.0;

/// Maximum perpendicular distance in pixels at which a point hits a line.
pub const LINE_HIT_TOLERANCE: f64 = 5.0;

// ── Styling ─────────────────────────────────────────────────────

/// Smallest stroke width a style edit may set.
pub const MIN_LINE_WIDTH: f64 = 1.0;
