use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::SketchError;
use crate::consts::{
    BRUSH_WIDTH, EXPORT_FILE_NAME, EXPORT_MIME, CIRCLE_RADIUS, MIN_POINT_SPACING, RECT_SIZE, SHAPE_FILL, SHAPE_ORIGIN, TEXT_FONT_SIZE, TEXT_ORIGIN,
    TEXT_PLACEHOLDER, TEXT_WIDTH,
};
use crate::doc::{ObjectId, Point, Shape, SketchDoc, SketchObject};
use crate::hit;
use crate::history::{History, Snapshot};
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The canvas must be redrawn.
    RenderNeeded,
    /// Undo/redo availability may have changed; refresh the buttons.
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// The selected object changed.
    SelectionChanged(Option<ObjectId>),
    /// The engine switched tools on its own (e.g. after placing a shape).
    ToolChanged(Tool),
}

/// Raster formats the canvas can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
}

impl ExportFormat {
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => EXPORT_MIME,
        }
    }

    /// Suggested download name for the exported image.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Png => EXPORT_FILE_NAME,
        }
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub doc: SketchDoc,
    pub history: History,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: SketchDoc::new(),
            history: History::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the document with a saved sketch and start a fresh history on it.
    ///
    /// The baseline is re-captured from the parsed document, so undo lands on the
    /// same bytes `snapshot()` produces.
    ///
    /// Switches to the select tool so the loaded objects can be moved right away.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be parsed.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<Vec<Action>, SketchError> {
        let doc = snapshot.restore()?;
        let baseline = Snapshot::capture(&doc)?;
        self.doc = doc;
        self.history.reset(baseline);
        self.input = InputState::Idle;
        self.ui.selected_id = None;
        self.ui.tool = Tool::Select;
        Ok(vec![
            Action::ToolChanged(Tool::Select),
            Action::SelectionChanged(None),
            self.history_action(),
            Action::RenderNeeded,
        ])
    }

    /// Parse snapshot JSON and load it.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid sketch document.
    pub fn load_json(&mut self, json: &str) -> Result<Vec<Action>, SketchError> {
        let snapshot = Snapshot::from_json(json)?;
        self.load_snapshot(&snapshot)
    }

    /// Capture the current document for saving.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn snapshot(&self) -> Result<Snapshot, SketchError> {
        Snapshot::capture(&self.doc)
    }

    // --- Tool / color ---

    /// Set the active tool. Abandons any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        if tool != Tool::Select && self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Set the brush color used for new strokes and shapes.
    pub fn set_color(&mut self, color: &str) {
        color.clone_into(&mut self.ui.color);
    }

    // --- Shapes ---

    /// Place a rectangle at the default position.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be recorded.
    pub fn add_rectangle(&mut self) -> Result<Vec<Action>, SketchError> {
        let shape = Shape::Rect {
            x: SHAPE_ORIGIN,
            y: SHAPE_ORIGIN,
            width: RECT_SIZE,
            height: RECT_SIZE,
            stroke: self.ui.color.clone(),
            fill: SHAPE_FILL.to_owned(),
            stroke_width: BRUSH_WIDTH,
        };
        self.place(shape)
    }

    /// Place a circle at the default position.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be recorded.
    pub fn add_circle(&mut self) -> Result<Vec<Action>, SketchError> {
        let shape = Shape::Circle {
            x: SHAPE_ORIGIN,
            y: SHAPE_ORIGIN,
            radius: CIRCLE_RADIUS,
            stroke: self.ui.color.clone(),
            fill: SHAPE_FILL.to_owned(),
            stroke_width: BRUSH_WIDTH,
        };
        self.place(shape)
    }

    /// Place a placeholder text box at the default position.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be recorded.
    pub fn add_text(&mut self) -> Result<Vec<Action>, SketchError> {
        let shape = Shape::Text {
            x: TEXT_ORIGIN,
            y: TEXT_ORIGIN,
            width: TEXT_WIDTH,
            text: TEXT_PLACEHOLDER.to_owned(),
            font_size: TEXT_FONT_SIZE,
            fill: self.ui.color.clone(),
        };
        self.place(shape)
    }

    /// Insert a shape, select it, and switch to the select tool.
    fn place(&mut self, shape: Shape) -> Result<Vec<Action>, SketchError> {
        let id = self.doc.push(shape);
        self.ui.selected_id = Some(id);
        self.ui.tool = Tool::Select;
        self.input = InputState::Idle;
        Ok(vec![
            Action::ToolChanged(Tool::Select),
            Action::SelectionChanged(Some(id)),
            self.record()?,
            Action::RenderNeeded,
        ])
    }

    // --- Edits ---

    /// Remove every object from the canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be recorded.
    pub fn clear(&mut self) -> Result<Vec<Action>, SketchError> {
        self.doc.clear();
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(self.record()?);
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Commit edited text from the host back into a text box.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be recorded.
    pub fn set_text(&mut self, id: &ObjectId, text: &str) -> Result<Vec<Action>, SketchError> {
        if !self.doc.set_text(id, text) {
            return Ok(Vec::new());
        }
        Ok(vec![self.record()?, Action::RenderNeeded])
    }

    /// Delete the selected object, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be recorded.
    pub fn delete_selected(&mut self) -> Result<Vec<Action>, SketchError> {
        let Some(id) = self.ui.selected_id.take() else {
            return Ok(Vec::new());
        };
        self.input = InputState::Idle;
        if self.doc.remove(&id).is_none() {
            return Ok(vec![Action::SelectionChanged(None)]);
        }
        Ok(vec![Action::SelectionChanged(None), self.record()?, Action::RenderNeeded])
    }

    // --- History ---

    /// Step back one edit. No-op when there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns an error if the restored snapshot cannot be parsed.
    pub fn undo(&mut self) -> Result<Vec<Action>, SketchError> {
        let Some(snapshot) = self.history.undo().cloned() else {
            return Ok(Vec::new());
        };
        self.restore(&snapshot)
    }

    /// Re-apply the last undone edit. No-op when there is nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns an error if the restored snapshot cannot be parsed.
    pub fn redo(&mut self) -> Result<Vec<Action>, SketchError> {
        let Some(snapshot) = self.history.redo().cloned() else {
            return Ok(Vec::new());
        };
        self.restore(&snapshot)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<Vec<Action>, SketchError> {
        self.doc = snapshot.restore()?;
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(self.history_action());
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    fn record(&mut self) -> Result<Action, SketchError> {
        let snapshot = Snapshot::capture(&self.doc)?;
        self.history.record(snapshot);
        Ok(self.history_action())
    }

    fn history_action(&self) -> Action {
        Action::HistoryChanged { can_undo: self.history.can_undo(), can_redo: self.history.can_redo() }
    }

    // --- Input events ---

    /// Start a gesture: a pen stroke, or selecting (and grabbing) an object.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match self.ui.tool {
            Tool::Pen => {
                self.input = InputState::Drawing { points: vec![pt] };
                vec![Action::RenderNeeded]
            }
            Tool::Select => {
                let hit = hit::hit_test(pt, &self.doc);
                let mut actions = Vec::new();
                if hit != self.ui.selected_id {
                    self.ui.selected_id = hit;
                    actions.push(Action::SelectionChanged(hit));
                }
                self.input = match hit {
                    Some(id) => InputState::DraggingObject { id, last: pt, moved: false },
                    None => InputState::Idle,
                };
                actions.push(Action::RenderNeeded);
                actions
            }
            Tool::Eraser => Vec::new(),
        }
    }

    /// Extend the active gesture.
    pub fn on_pointer_move(&mut self, pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Drawing { points } => {
                if points.last().is_some_and(|last| last.distance(pt) < MIN_POINT_SPACING) {
                    return Vec::new();
                }
                points.push(pt);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingObject { id, last, moved } => {
                if pt == *last {
                    return Vec::new();
                }
                let (dx, dy) = (pt.x - last.x, pt.y - last.y);
                if !self.doc.translate(id, dx, dy) {
                    self.input = InputState::Idle;
                    return Vec::new();
                }
                *last = pt;
                *moved = true;
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Finish the active gesture, committing a pen path or a move to history.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be recorded.
    pub fn on_pointer_up(
        &mut self,
        pt: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Result<Vec<Action>, SketchError> {
        if button != Button::Primary {
            return Ok(Vec::new());
        }
        let mut actions = self.on_pointer_move(pt, modifiers);
        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::Drawing { points } => {
                let shape = Shape::Path { points, stroke: self.ui.color.clone(), stroke_width: BRUSH_WIDTH };
                self.doc.push(shape);
                actions.push(self.record()?);
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingObject { moved, .. } => {
                if moved {
                    actions.push(self.record()?);
                }
            }
        }
        Ok(actions)
    }

    /// Keyboard shortcuts: undo, redo, delete selection.
    ///
    /// # Errors
    ///
    /// Returns an error if an undo/redo/delete fails.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Result<Vec<Action>, SketchError> {
        if modifiers.command() && key.is("z") {
            return if modifiers.shift { self.redo() } else { self.undo() };
        }
        if modifiers.command() && key.is("y") {
            return self.redo();
        }
        if key.is("Delete") || key.is("Backspace") {
            return self.delete_selected();
        }
        if key.is("Escape") && self.ui.selected_id.take().is_some() {
            return Ok(vec![Action::SelectionChanged(None), Action::RenderNeeded]);
        }
        Ok(Vec::new())
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&SketchObject> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.ui.color
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

/// The full sketch engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    /// # Errors
    ///
    /// See [`EngineCore::load_json`].
    pub fn load_json(&mut self, json: &str) -> Result<Vec<Action>, SketchError> {
        self.core.load_json(json)
    }

    /// # Errors
    ///
    /// See [`EngineCore::snapshot`].
    pub fn snapshot(&self) -> Result<Snapshot, SketchError> {
        self.core.snapshot()
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn set_color(&mut self, color: &str) {
        self.core.set_color(color);
    }

    // --- Viewport ---

    /// Resize the backing store to `width_css × height_css` at device pixel ratio `dpr`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.core.viewport_width = width_css.max(0.0);
        self.core.viewport_height = height_css.max(0.0);
        self.core.dpr = dpr;
        self.canvas.set_width((self.core.viewport_width * dpr).round() as u32);
        self.canvas.set_height((self.core.viewport_height * dpr).round() as u32);
        vec![Action::RenderNeeded]
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(
            &ctx,
            &self.core.doc,
            &self.core.ui,
            &self.core.input,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }

    /// Render the current state and encode the canvas as a `data:image/png` URL.
    ///
    /// The host hands the URL to a download link named [`ExportFormat::file_name`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if rendering fails or the canvas is tainted.
    pub fn export_png(&self) -> Result<String, JsValue> {
        self.export(ExportFormat::Png)
    }

    /// Render and encode the canvas in `format`.
    ///
    /// # Errors
    ///
    /// See [`Engine::export_png`].
    pub fn export(&self, format: ExportFormat) -> Result<String, JsValue> {
        self.render()?;
        self.canvas.to_data_url_with_type(format.mime())
    }
}
