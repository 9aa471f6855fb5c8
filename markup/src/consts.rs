//! Shared numeric constants for the markup crate.

// ── Viewport ────────────────────────────────────────────────────

/// Minimum zoom factor (10% of natural image size).
pub const ZOOM_MIN: f64 = 0.1;

/// Maximum zoom factor (1000% of natural image size).
pub const ZOOM_MAX: f64 = 10.0;

/// Multiplicative step applied by the `+` / `-` keyboard shortcuts.
pub const ZOOM_KEY_STEP: f64 = 1.2;

/// Multiplicative step applied per wheel notch, anchored at the cursor.
pub const ZOOM_WHEEL_STEP: f64 = 1.1;

// ── Arrowheads ──────────────────────────────────────────────────

/// Arrowhead line length in drawing units. Render-time constant; never
/// persisted with the arrow endpoints.
pub const ARROW_HEAD_LEN: f64 = 12.0;

/// Half-angle between the shaft and each arrowhead line, in radians.
pub const ARROW_HEAD_ANGLE: f64 = 0.4;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for strokes and outlines.
pub const HIT_SLOP_PX: f64 = 8.0;

// ── Markup defaults ─────────────────────────────────────────────

/// Stroke width for new ink and shape markups, in drawing units.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Font size for new text markups, in drawing units.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Font size for new callout markups, in drawing units.
pub const CALLOUT_FONT_SIZE: f64 = 14.0;

/// Fixed hyperlink marker extent in drawing units (width and height).
pub const HYPERLINK_MARKER_SIZE: f64 = 24.0;

/// Distance unit suffix for dimension labels. Pixel-based only; no
/// real-world calibration.
pub const DIMENSION_UNIT: &str = "px";

// ── Pins ────────────────────────────────────────────────────────

/// Pin marker radius in screen pixels (constant apparent size at any zoom).
pub const PIN_RADIUS_PX: f64 = 10.0;
