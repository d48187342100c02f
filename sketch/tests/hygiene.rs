//! Hygiene: enforces coding standards at test time
//!
//! These tests scan the production sources of the browser-side crates
//! (`sketch` and `notes`) for antipatterns. Each rule has a budget (ideally
//! zero). If you must add one, you have to fix an existing one first; the
//! budget never grows.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::{Path, PathBuf};

/// `(pattern, budget, what it costs us)`.
///
/// Both crates run inside the browser where a panic aborts the whole wasm
/// instance and takes the open editor with it.
const RULES: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics in wasm"),
    (".expect(", 0, "panics in wasm"),
    ("panic!(", 0, "panics in wasm"),
    ("unreachable!(", 0, "panics in wasm"),
    ("todo!(", 0, "unfinished stub"),
    ("unimplemented!(", 0, "unfinished stub"),
    ("let _ =", 0, "discards an error unseen"),
    (".ok()", 0, "discards an error unseen"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
    ("console::log", 0, "debug output left behind; use the log facade"),
];

/// Files on the per-frame path. Direct indexing there panics on an empty or
/// short point list instead of drawing nothing.
const FRAME_PATH: &[&str] = &["render.rs", "hit.rs"];
const MAX_FRAME_INDEXING: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

fn crate_roots() -> [PathBuf; 2] {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    [manifest.join("src"), manifest.join("../notes/src")]
}

/// Collect every `.rs` file under the scanned roots, test files included.
fn all_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    for root in crate_roots() {
        collect_rs_files(&root, &mut files);
    }
    files
}

/// Production files only.
fn source_files() -> Vec<SourceFile> {
    all_files().into_iter().filter(|f| !f.path.ends_with("_test.rs")).collect()
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path.to_string_lossy().to_string(), content });
            }
        }
    }
}

fn count_lines(files: &[SourceFile], matches: impl Fn(&str) -> bool) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| matches(line)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn total(hits: &[(String, usize)]) -> usize {
    hits.iter().map(|(_, c)| c).sum()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter().map(|(path, count)| format!("  {path}: {count}")).collect::<Vec<_>>().join("\n")
}

/// True if `line` indexes or slices with a literal, like `points[0]` or `seg[1..]`.
fn has_literal_index(line: &str) -> bool {
    let code = line.trim_start();
    if code.starts_with("//") {
        return false;
    }
    let bytes = code.as_bytes();
    bytes.windows(3).any(|w| {
        let indexed = w[0].is_ascii_alphanumeric() || w[0] == b'_' || w[0] == b')';
        indexed && w[1] == b'[' && (w[2].is_ascii_digit() || w[2] == b'.')
    })
}

#[test]
fn scans_both_crates() {
    let files = source_files();
    for marker in ["engine.rs", "autosave.rs"] {
        assert!(
            files.iter().any(|f| f.path.ends_with(marker)),
            "{marker} not found; scanned roots {:?}",
            crate_roots()
        );
    }
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for &(pattern, budget, why) in RULES {
        let hits = count_lines(&files, |line| line.contains(pattern));
        let count = total(&hits);
        if count > budget {
            failures.push(format!("{pattern} ({why}): found {count}, max {budget}\n{}", format_hits(&hits)));
        }
    }
    assert!(failures.is_empty(), "budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn frame_path_uses_no_literal_indexing() {
    let files: Vec<SourceFile> = source_files()
        .into_iter()
        .filter(|f| FRAME_PATH.iter().any(|name| f.path.ends_with(name)))
        .collect();
    assert_eq!(files.len(), FRAME_PATH.len(), "frame-path files moved");

    let hits = count_lines(&files, has_literal_index);
    let count = total(&hits);
    assert!(
        count <= MAX_FRAME_INDEXING,
        "literal indexing on the frame path: found {count}, max {MAX_FRAME_INDEXING}. Use slice patterns or iterators.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn literal_index_detector() {
    assert!(has_literal_index("for p in &points[1..] {"));
    assert!(has_literal_index("distance(seg[0], seg[1])"));
    assert!(has_literal_index("f(x)[0]"));
    assert!(!has_literal_index("let [first, rest @ ..] = points else {"));
    assert!(!has_literal_index("fn draw(points: &[Point]) {"));
    assert!(!has_literal_index("#[path = \"hit_test.rs\"]"));
    assert!(!has_literal_index("// points[0] is the anchor"));
}

/// Every sibling `*_test.rs` must be wired in through `#[path = "..."]`,
/// otherwise it silently never compiles.
#[test]
fn sibling_tests_are_wired() {
    let files = all_files();
    let orphans: Vec<&str> = files
        .iter()
        .filter(|f| f.path.ends_with("_test.rs"))
        .filter_map(|test| {
            let name = Path::new(&test.path).file_name()?.to_str()?;
            let needle = format!("#[path = \"{name}\"]");
            let dir = Path::new(&test.path).parent()?;
            let wired = files
                .iter()
                .any(|f| Path::new(&f.path).parent() == Some(dir) && f.content.contains(&needle));
            (!wired).then_some(test.path.as_str())
        })
        .collect();
    assert!(orphans.is_empty(), "test files not referenced by any module: {orphans:?}");
}
