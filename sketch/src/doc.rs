//! Document model: sketch objects and the ordered document that owns them.
//!
//! A sketch is a flat list of objects drawn in insertion order: freehand pen
//! paths, rectangles, circles, and text boxes. The whole document is what
//! gets serialized into a [`crate::history::Snapshot`], so every type here is
//! `Serialize + Deserialize` and carries everything needed to redraw it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{TEXT_AVG_CHAR_WIDTH, TEXT_LINE_HEIGHT};

/// Unique identifier for a sketch object.
pub type ObjectId = Uuid;

/// Current serialization format of [`SketchDoc`].
pub const FORMAT_VERSION: u32 = 1;

/// A point in canvas coordinates (CSS pixels, origin at the top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Whether `pt` lies inside the box grown by `slop` on every side.
    #[must_use]
    pub fn contains(&self, pt: Point, slop: f64) -> bool {
        pt.x >= self.x - slop
            && pt.x <= self.x + self.width + slop
            && pt.y >= self.y - slop
            && pt.y <= self.y + self.height + slop
    }
}

/// The kind of a sketch object, without its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Freehand pen stroke.
    Path,
    /// Outlined rectangle.
    Rect,
    /// Outlined circle.
    Circle,
    /// Editable text box.
    Text,
}

/// Geometry and style of a sketch object, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Polyline through the sampled pen positions.
    Path { points: Vec<Point>, stroke: String, stroke_width: f64 },
    /// Rectangle with its top-left corner at `(x, y)`.
    Rect { x: f64, y: f64, width: f64, height: f64, stroke: String, fill: String, stroke_width: f64 },
    /// Circle whose bounding box starts at `(x, y)`.
    Circle { x: f64, y: f64, radius: f64, stroke: String, fill: String, stroke_width: f64 },
    /// Text box wrapped to `width`, growing downward with its content.
    Text { x: f64, y: f64, width: f64, text: String, font_size: f64, fill: String },
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Path { .. } => ObjectKind::Path,
            Self::Rect { .. } => ObjectKind::Rect,
            Self::Circle { .. } => ObjectKind::Circle,
            Self::Text { .. } => ObjectKind::Text,
        }
    }

    /// Bounding box of the shape. Text height is estimated from its wrapped line count.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Path { points, .. } => {
                let Some(first) = points.first() else {
                    return Bounds { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
                };
                let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
                for p in points {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
                Bounds { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y }
            }
            Self::Rect { x, y, width, height, .. } => Bounds { x: *x, y: *y, width: *width, height: *height },
            Self::Circle { x, y, radius, .. } => Bounds { x: *x, y: *y, width: radius * 2.0, height: radius * 2.0 },
            Self::Text { x, y, width, text, font_size, .. } => {
                let lines = estimated_line_count(text, *width, *font_size);
                #[allow(clippy::cast_precision_loss)]
                let height = lines as f64 * font_size * TEXT_LINE_HEIGHT;
                Bounds { x: *x, y: *y, width: *width, height }
            }
        }
    }

    /// Move the shape by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Path { points, .. } => {
                for p in points {
                    p.x += dx;
                    p.y += dy;
                }
            }
            Self::Rect { x, y, .. } | Self::Circle { x, y, .. } | Self::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
    }
}

/// Rows a text box occupies once wrapped to `width`.
///
/// Mirrors the renderer's greedy word wrap, with every glyph assumed to be
/// `TEXT_AVG_CHAR_WIDTH` em wide. Words longer than a row are broken.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn estimated_line_count(text: &str, width: f64, font_size: f64) -> usize {
    let glyph = font_size * TEXT_AVG_CHAR_WIDTH;
    let per_row = if width > 0.0 && glyph > 0.0 { ((width / glyph).floor() as usize).max(1) } else { usize::MAX };

    let rows: usize = text
        .lines()
        .map(|line| {
            let mut rows = 1;
            let mut used = 0usize;
            for word in line.split_whitespace() {
                let len = word.chars().count();
                if used == 0 {
                    used = len;
                } else if used + 1 + len <= per_row {
                    used += 1 + len;
                } else {
                    rows += 1;
                    used = len;
                }
                if used > per_row {
                    rows += (used - 1) / per_row;
                    used = (used - 1) % per_row + 1;
                }
            }
            rows
        })
        .sum();
    rows.max(1)
}

/// A sketch object as stored in the document and in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub shape: Shape,
}

impl SketchObject {
    /// Wrap a shape with a fresh id.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self { id: Uuid::new_v4(), shape }
    }
}

/// The full contents of a sketch canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchDoc {
    /// Serialization format version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Objects in draw order (first is bottom-most).
    #[serde(default)]
    pub objects: Vec<SketchObject>,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

impl Default for SketchDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchDoc {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self { version: FORMAT_VERSION, objects: Vec::new() }
    }

    /// Append a shape on top of everything else and return its id.
    pub fn push(&mut self, shape: Shape) -> ObjectId {
        let obj = SketchObject::new(shape);
        let id = obj.id;
        self.objects.push(obj);
        id
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&SketchObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut SketchObject> {
        self.objects.iter_mut().find(|o| &o.id == id)
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<SketchObject> {
        let idx = self.objects.iter().position(|o| &o.id == id)?;
        Some(self.objects.remove(idx))
    }

    /// Move an object. Returns false if the object doesn't exist.
    pub fn translate(&mut self, id: &ObjectId, dx: f64, dy: f64) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        obj.shape.translate(dx, dy);
        true
    }

    /// Replace the content of a text box. Returns false if `id` is missing or
    /// not a text box.
    pub fn set_text(&mut self, id: &ObjectId, new_text: &str) -> bool {
        match self.get_mut(id) {
            Some(SketchObject { shape: Shape::Text { text, .. }, .. }) => {
                new_text.clone_into(text);
                true
            }
            _ => false,
        }
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Objects in draw order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SketchObject> {
        self.objects.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
