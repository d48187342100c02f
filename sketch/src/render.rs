//! Rendering: draws the sketch to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the document, UI state, and the gesture in
//! progress and produces pixels; it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{BRUSH_WIDTH, TEXT_LINE_HEIGHT};
use crate::doc::{Point, Shape, SketchDoc, SketchObject};
use crate::input::{InputState, UiState};

/// Selection outline dash length in pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Gap between an object's bounds and its selection outline.
const SELECTION_PAD_PX: f64 = 4.0;

const SELECTION_COLOR: &str = "#1E90FF";

/// Draw the full scene: objects, the stroke being drawn, and the selection outline.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    doc: &SketchDoc,
    ui: &UiState,
    input: &InputState,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);

    // Layer 2: objects in draw order.
    for obj in doc.iter() {
        draw_object(ctx, obj)?;
    }

    // Layer 3: the stroke still under the pen.
    if let InputState::Drawing { points } = input {
        draw_polyline(ctx, points, &ui.color, BRUSH_WIDTH);
    }

    // Layer 4: selection UI.
    if let Some(obj) = ui.selected_id.and_then(|id| doc.get(&id)) {
        draw_selection(ctx, obj)?;
    }

    Ok(())
}

// =============================================================
// Object dispatch
// =============================================================

fn draw_object(ctx: &CanvasRenderingContext2d, obj: &SketchObject) -> Result<(), JsValue> {
    match &obj.shape {
        Shape::Path { points, stroke, stroke_width } => {
            draw_polyline(ctx, points, stroke, *stroke_width);
            Ok(())
        }
        Shape::Rect { x, y, width, height, stroke, fill, stroke_width } => {
            ctx.save();
            ctx.set_fill_style_str(fill);
            ctx.fill_rect(*x, *y, *width, *height);
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(*stroke_width);
            ctx.stroke_rect(*x, *y, *width, *height);
            ctx.restore();
            Ok(())
        }
        Shape::Circle { x, y, radius, stroke, fill, stroke_width } => {
            ctx.save();
            ctx.begin_path();
            ctx.arc(x + radius, y + radius, *radius, 0.0, 2.0 * PI)?;
            ctx.set_fill_style_str(fill);
            ctx.fill();
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(*stroke_width);
            ctx.stroke();
            ctx.restore();
            Ok(())
        }
        Shape::Text { x, y, width, text, font_size, fill } => draw_text(ctx, *x, *y, *width, text, *font_size, fill),
    }
}

// =============================================================
// Shape renderers
// =============================================================

fn draw_polyline(ctx: &CanvasRenderingContext2d, points: &[Point], stroke: &str, stroke_width: f64) {
    let [first, rest @ ..] = points else {
        return;
    };

    ctx.save();
    ctx.set_stroke_style_str(stroke);
    ctx.set_line_width(stroke_width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    if rest.is_empty() {
        // A tap still leaves a dot.
        ctx.line_to(first.x, first.y);
    }
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_text(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    width: f64,
    text: &str,
    font_size: f64,
    fill: &str,
) -> Result<(), JsValue> {
    if text.is_empty() {
        return Ok(());
    }

    ctx.save();
    ctx.set_fill_style_str(fill);
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    ctx.set_font(&format!("{font_size}px sans-serif"));

    let line_height = font_size * TEXT_LINE_HEIGHT;
    let max_w = width.max(1.0);
    for (idx, line) in wrap_text_lines(ctx, text, max_w).iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let line_y = y + idx as f64 * line_height;
        ctx.fill_text(line, x, line_y)?;
    }

    ctx.restore();
    Ok(())
}

fn wrap_text_lines(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if current.is_empty() || measured_text_width(ctx, &candidate) <= max_w {
                current = candidate;
            } else {
                out.push(std::mem::take(&mut current));
                word.clone_into(&mut current);
            }
            if measured_text_width(ctx, &current) > max_w {
                let mut chunks = break_long_word(ctx, &current, max_w);
                current = chunks.pop().unwrap_or_default();
                out.extend(chunks);
            }
        }
        out.push(current);
    }
    out
}

fn break_long_word(ctx: &CanvasRenderingContext2d, word: &str, max_w: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && measured_text_width(ctx, &candidate) > max_w {
            lines.push(current);
            current = ch.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, obj: &SketchObject) -> Result<(), JsValue> {
    let b = obj.shape.bounds();

    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH_PX.into());
    dash_array.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.stroke_rect(
        b.x - SELECTION_PAD_PX,
        b.y - SELECTION_PAD_PX,
        b.width + SELECTION_PAD_PX * 2.0,
        b.height + SELECTION_PAD_PX * 2.0,
    );
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}
