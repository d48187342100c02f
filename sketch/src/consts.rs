//! Shared defaults for the sketch crate.

// ── Brush ───────────────────────────────────────────────────────

/// Default pen and shape color.
pub const DEFAULT_COLOR: &str = "#000000";

/// Stroke width used for pen paths and shape outlines.
pub const BRUSH_WIDTH: f64 = 3.0;

/// Pen samples closer than this to the previous sample are dropped.
pub const MIN_POINT_SPACING: f64 = 1.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Top-left corner where new rectangles and circles are placed.
pub const SHAPE_ORIGIN: f64 = 100.0;

/// Side length of a new rectangle.
pub const RECT_SIZE: f64 = 100.0;

/// Radius of a new circle.
pub const CIRCLE_RADIUS: f64 = 50.0;

/// Fill for new rectangles and circles.
pub const SHAPE_FILL: &str = "transparent";

// ── Text ────────────────────────────────────────────────────────

/// Top-left corner where new text boxes are placed.
pub const TEXT_ORIGIN: f64 = 50.0;

/// Width of a new text box.
pub const TEXT_WIDTH: f64 = 200.0;

/// Font size of a new text box, in pixels.
pub const TEXT_FONT_SIZE: f64 = 20.0;

/// Placeholder content of a new text box.
pub const TEXT_PLACEHOLDER: &str = "Write here...";

/// Line height as a multiple of the font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.16;

/// Average glyph advance as a multiple of the font size, for estimating wraps
/// without a canvas to measure against.
pub const TEXT_AVG_CHAR_WIDTH: f64 = 0.5;

// ── History ─────────────────────────────────────────────────────

/// Number of snapshots kept on the undo stack before the oldest is folded into the baseline.
pub const HISTORY_CAPACITY: usize = 100;

// ── Hit-testing ─────────────────────────────────────────────────

/// Extra slop around thin strokes and text boxes, in pixels.
pub const HIT_SLOP_PX: f64 = 4.0;

// ── Export ──────────────────────────────────────────────────────

/// MIME type passed to the canvas encoder for image export.
pub const EXPORT_MIME: &str = "image/png";

/// Download name for an exported sketch.
pub const EXPORT_FILE_NAME: &str = "sketch.png";
