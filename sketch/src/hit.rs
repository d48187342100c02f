#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HIT_SLOP_PX;
use crate::doc::{ObjectId, Point, Shape, SketchDoc, SketchObject};

/// Return the topmost object under `pt`, if any.
///
/// Objects are tested from the top of the draw order down. Rectangles and
/// text boxes hit anywhere inside their box (transparent fill still selects),
/// circles inside their radius, and paths within half their stroke width of
/// any segment. Every test allows [`HIT_SLOP_PX`] of slack.
#[must_use]
pub fn hit_test(pt: Point, doc: &SketchDoc) -> Option<ObjectId> {
    doc.iter().rev().find(|obj| hits(obj, pt)).map(|obj| obj.id)
}

fn hits(obj: &SketchObject, pt: Point) -> bool {
    match &obj.shape {
        Shape::Path { points, stroke_width, .. } => {
            let reach = stroke_width / 2.0 + HIT_SLOP_PX;
            match points.as_slice() {
                [] => false,
                [only] => only.distance(pt) <= reach,
                _ => points.windows(2).any(|seg| match seg {
                    [a, b] => distance_to_segment(pt, *a, *b) <= reach,
                    _ => false,
                }),
            }
        }
        Shape::Circle { x, y, radius, stroke_width, .. } => {
            let center = Point::new(x + radius, y + radius);
            center.distance(pt) <= radius + stroke_width / 2.0 + HIT_SLOP_PX
        }
        Shape::Rect { stroke_width, .. } => obj.shape.bounds().contains(pt, stroke_width / 2.0 + HIT_SLOP_PX),
        Shape::Text { .. } => obj.shape.bounds().contains(pt, HIT_SLOP_PX),
    }
}

/// Shortest distance from `pt` to the segment `a`–`b`.
#[must_use]
pub fn distance_to_segment(pt: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return pt.distance(a);
    }
    let t = (((pt.x - a.x) * dx + (pt.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    pt.distance(Point::new(a.x + t * dx, a.y + t * dy))
}
