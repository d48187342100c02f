//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture being tracked between pointer-down and
//! pointer-up, carrying what is needed to emit the final edit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::DEFAULT_COLOR;
use crate::doc::{ObjectId, Point};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand drawing (default).
    #[default]
    Pen,
    /// Select and drag existing objects.
    Select,
    /// Eraser. The host pairs it with a full clear; pointer input is ignored.
    Eraser,
}

impl Tool {
    /// Parse the tool name used by the host page.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pen" => Some(Self::Pen),
            "select" | "selection" => Some(Self::Select),
            "eraser" => Some(Self::Eraser),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Select => "select",
            Self::Eraser => "eraser",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button, pen contact, or single-finger touch.
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"z"`, `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this key matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Brush color for pen strokes and new shapes.
    pub color: String,
    /// The id of the currently selected object, if any.
    pub selected_id: Option<ObjectId>,
}

impl Default for UiState {
    fn default() -> Self {
        Self { tool: Tool::default(), color: DEFAULT_COLOR.to_owned(), selected_id: None }
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A pen stroke is being drawn.
    Drawing {
        /// Sampled positions so far, in canvas coordinates.
        points: Vec<Point>,
    },
    /// An existing object is being moved.
    DraggingObject {
        /// Id of the object being dragged.
        id: ObjectId,
        /// Pointer position at the previous event.
        last: Point,
        /// Whether the object has moved since pointer-down.
        moved: bool,
    },
}
