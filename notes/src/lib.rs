//! Note editing helpers for Notely.
//!
//! Everything here is plain Rust so the browser client and native tests share
//! it. The `hydrate` feature adds a `localStorage`-backed draft store.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`text`] | Word/character counting, the character limit, HTML to plain text |
//! | [`draft`] | The [`draft::DraftStore`] trait and its memory/browser stores |
//! | [`autosave`] | Fixed-interval draft writer |

pub mod autosave;
pub mod draft;
pub mod text;
