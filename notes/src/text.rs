//! Counting and limits for note text.
//!
//! The editor hands us HTML. Counts are taken over the text a reader sees, so
//! callers usually run [`plain_text`] first.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use serde::Serialize;

/// Maximum number of characters a note may hold.
pub const CHARACTER_LIMIT: usize = 1000;

/// Tags that start a new line when flattened to plain text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "tr",
];

/// Counts shown under the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStats {
    pub words: usize,
    pub chars: usize,
    /// Characters left before the limit; zero once it is reached or exceeded.
    pub remaining: usize,
}

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of Unicode scalar values.
#[must_use]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[must_use]
pub fn within_limit(text: &str) -> bool {
    char_count(text) <= CHARACTER_LIMIT
}

/// Cut `text` down to at most [`CHARACTER_LIMIT`] characters.
///
/// Always splits on a character boundary.
#[must_use]
pub fn truncate_to_limit(text: &str) -> &str {
    match text.char_indices().nth(CHARACTER_LIMIT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[must_use]
pub fn stats(text: &str) -> NoteStats {
    let chars = char_count(text);
    NoteStats { words: word_count(text), chars, remaining: CHARACTER_LIMIT.saturating_sub(chars) }
}

/// Flatten editor HTML to the text a reader sees.
///
/// Tags are dropped, block-level tags become line breaks, and the common
/// entities are decoded. An unterminated tag swallows the rest of the input.
#[must_use]
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&decode_entities(&rest[..open]));
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            rest = "";
            break;
        };
        if is_block_tag(&after[..close]) && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        rest = &after[close + 1..];
    }
    out.push_str(&decode_entities(rest));

    out.trim().to_owned()
}

fn is_block_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    // `&amp;` last so an escaped entity is not decoded twice.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
