//! JSON edit listing for the CLI's `--json` mode.
//!
//! Each pass produces an ordered plan of span replacements; this module
//! materializes those plans against the text the pass ran over, attaching
//! the original text and a 1-indexed line/column so a caller can apply or
//! inspect the edits without re-running the passes.

use serde::Serialize;

use crate::span::{offset_to_position, Span};
use crate::splice::Replacement;

/// One materialized edit, ready for serialization.
///
/// `span`, `line`, and `col` refer to the text the owning pass ran over,
/// which for the second pass is the output of the first.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Edit {
    /// File path as given on the command line.
    pub file: String,
    /// Which pass produced the edit (`"quotes"` or `"generics"`).
    pub pass: &'static str,
    /// Byte range replaced, half-open.
    pub span: Span,
    /// Text previously occupying the span.
    pub old_text: String,
    /// Replacement text.
    pub new_text: String,
    /// Line of the span start (1-indexed).
    pub line: u32,
    /// Column of the span start (1-indexed, in characters).
    pub col: u32,
}

/// Materialize a pass's replacement plan against the text it ran over.
pub fn materialize(
    file: &str,
    pass: &'static str,
    source: &str,
    replacements: &[Replacement],
) -> Vec<Edit> {
    replacements
        .iter()
        .map(|r| {
            let (line, col) = offset_to_position(source, r.span.start);
            Edit {
                file: file.to_string(),
                pass,
                span: r.span,
                old_text: r.span.slice(source).to_string(),
                new_text: r.text.clone(),
                line,
                col,
            }
        })
        .collect()
}
