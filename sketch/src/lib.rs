//! Sketch canvas core for Notely.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! sketch document, the undo/redo history, the tool and color state, and the
//! pointer gesture machine that turns raw input into document edits. The host
//! page only wires DOM events to the engine, asks it to render, and uploads the
//! resulting [`history::Snapshot`] when the user saves.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Sketch objects and the ordered document |
//! | [`history`] | Snapshots and the bounded undo/redo stack |
//! | [`input`] | Tools and the pointer gesture state machine |
//! | [`hit`] | Hit-testing against sketch objects |
//! | [`render`] | Scene rendering to a 2D canvas context |
//! | [`consts`] | Shared defaults (brush width, shape sizes, history capacity) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod history;
pub mod input;
pub mod render;

/// Errors raised by the sketch core.
#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    /// A snapshot could not be produced from, or parsed back into, a document.
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
    /// A snapshot was written by a newer format than this build understands.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}
