#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn rect_at(x: f64, y: f64) -> Shape {
    Shape::Rect {
        x,
        y,
        width: 100.0,
        height: 100.0,
        stroke: "#000000".into(),
        fill: "transparent".into(),
        stroke_width: 3.0,
    }
}

fn text_box(text: &str) -> Shape {
    Shape::Text { x: 50.0, y: 50.0, width: 200.0, text: text.into(), font_size: 20.0, fill: "#000000".into() }
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn object_serializes_kind_tag_flat() {
    let mut doc = SketchDoc::new();
    let id = doc.push(rect_at(10.0, 20.0));
    let value = serde_json::to_value(&doc.objects[0]).unwrap();
    assert_eq!(value["kind"], "rect");
    assert_eq!(value["id"], json!(id));
    assert_eq!(value["x"], 10.0);
    assert_eq!(value["fill"], "transparent");
}

#[test]
fn object_deserializes_integer_coordinates() {
    let raw = json!({
        "id": "00000000-0000-0000-0000-000000000001",
        "kind": "circle",
        "x": 100,
        "y": 100,
        "radius": 50,
        "stroke": "#ff0000",
        "fill": "transparent",
        "stroke_width": 3
    });
    let obj: SketchObject = serde_json::from_value(raw).unwrap();
    assert_eq!(obj.shape.kind(), ObjectKind::Circle);
    assert_eq!(obj.shape.bounds().width, 100.0);
}

#[test]
fn unknown_kind_is_rejected() {
    let raw = json!({ "id": "00000000-0000-0000-0000-000000000001", "kind": "star" });
    assert!(serde_json::from_value::<SketchObject>(raw).is_err());
}

#[test]
fn doc_defaults_missing_fields() {
    let doc: SketchDoc = serde_json::from_str("{}").unwrap();
    assert_eq!(doc.version, FORMAT_VERSION);
    assert!(doc.is_empty());
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn path_bounds_cover_all_points() {
    let shape = Shape::Path {
        points: vec![Point::new(10.0, 5.0), Point::new(-2.0, 30.0), Point::new(4.0, 12.0)],
        stroke: "#000000".into(),
        stroke_width: 3.0,
    };
    let b = shape.bounds();
    assert_eq!((b.x, b.y, b.width, b.height), (-2.0, 5.0, 12.0, 25.0));
}

#[test]
fn empty_path_bounds_are_zero() {
    let shape = Shape::Path { points: Vec::new(), stroke: "#000000".into(), stroke_width: 3.0 };
    assert_eq!(shape.bounds().width, 0.0);
}

#[test]
fn text_bounds_grow_with_lines() {
    let one = text_box("hello").bounds();
    let three = text_box("a\nb\nc").bounds();
    assert!(three.height > one.height * 2.9);
    assert_eq!(one.width, 200.0);
}

#[test]
fn text_bounds_count_wrapped_rows() {
    // 20px font at half an em per glyph fits four "word"s in a 200px row.
    let wrapped = text_box(&"word ".repeat(60)).bounds();
    assert!((wrapped.height - 15.0 * 20.0 * 1.16).abs() < 1e-9);

    let short = text_box("Write here...").bounds();
    assert!((short.height - 20.0 * 1.16).abs() < 1e-9);
}

#[test]
fn text_bounds_break_long_words() {
    let b = text_box(&"x".repeat(45)).bounds();
    assert!((b.height - 3.0 * 20.0 * 1.16).abs() < 1e-9);
}

#[test]
fn text_bounds_tolerate_zero_width() {
    let shape = Shape::Text { x: 0.0, y: 0.0, width: 0.0, text: "a b c".into(), font_size: 20.0, fill: "#000".into() };
    assert!((shape.bounds().height - 20.0 * 1.16).abs() < 1e-9);
}

#[test]
fn bounds_contains_respects_slop() {
    let b = rect_at(0.0, 0.0).bounds();
    assert!(b.contains(Point::new(50.0, 50.0), 0.0));
    assert!(!b.contains(Point::new(103.0, 50.0), 0.0));
    assert!(b.contains(Point::new(103.0, 50.0), 4.0));
}

// =============================================================
// SketchDoc
// =============================================================

#[test]
fn push_keeps_insertion_order() {
    let mut doc = SketchDoc::new();
    let a = doc.push(rect_at(0.0, 0.0));
    let b = doc.push(text_box("x"));
    let ids: Vec<_> = doc.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn remove_returns_object_and_shrinks() {
    let mut doc = SketchDoc::new();
    let id = doc.push(rect_at(0.0, 0.0));
    assert!(doc.remove(&id).is_some());
    assert!(doc.remove(&id).is_none());
    assert!(doc.is_empty());
}

#[test]
fn translate_moves_every_path_point() {
    let mut doc = SketchDoc::new();
    let id = doc.push(Shape::Path {
        points: vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
        stroke: "#000000".into(),
        stroke_width: 3.0,
    });
    assert!(doc.translate(&id, 5.0, -5.0));
    let Some(SketchObject { shape: Shape::Path { points, .. }, .. }) = doc.get(&id) else {
        panic!("expected path");
    };
    assert_eq!(points[0], Point::new(5.0, -5.0));
    assert_eq!(points[1], Point::new(15.0, 5.0));
}

#[test]
fn translate_missing_object_is_false() {
    let mut doc = SketchDoc::new();
    assert!(!doc.translate(&Uuid::new_v4(), 1.0, 1.0));
}

#[test]
fn set_text_only_applies_to_text_boxes() {
    let mut doc = SketchDoc::new();
    let rect = doc.push(rect_at(0.0, 0.0));
    let text = doc.push(text_box("before"));
    assert!(!doc.set_text(&rect, "nope"));
    assert!(doc.set_text(&text, "after"));
    let Some(SketchObject { shape: Shape::Text { text, .. }, .. }) = doc.get(&text) else {
        panic!("expected text");
    };
    assert_eq!(text, "after");
}

#[test]
fn clear_empties_doc() {
    let mut doc = SketchDoc::new();
    doc.push(rect_at(0.0, 0.0));
    doc.push(rect_at(1.0, 1.0));
    doc.clear();
    assert_eq!(doc.len(), 0);
}
