//! Byte spans and text position utilities.
//!
//! Spans are half-open byte intervals `[start, end)` into the source text
//! being rewritten. Line and column values are 1-indexed; byte offsets are
//! 0-indexed. Column offsets used by the layout width rule count characters,
//! not bytes, so multi-byte content does not inflate the printed width.

use std::fmt;

use memchr::memrchr;
use serde::{Deserialize, Serialize};

/// Byte offsets into the source text being rewritten.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span overlaps with another.
    ///
    /// Adjacent spans (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Slice the span out of the source text.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Number of characters between the last newline before `offset` and
/// `offset` itself.
///
/// This is the printed column a span starting at `offset` occupies, used
/// as the starting budget for the layout width rule.
pub fn column_offset(source: &str, offset: usize) -> usize {
    let bol = memrchr(b'\n', source[..offset].as_bytes())
        .map(|i| i + 1)
        .unwrap_or(0);
    source[bol..offset].chars().count()
}

/// Convert a byte offset to 1-indexed line and column.
///
/// Columns count characters from the beginning of the line. If `offset`
/// exceeds the text length it is clamped to the end.
pub fn offset_to_position(source: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(source.len());
    let line = source[..offset].bytes().filter(|&b| b == b'\n').count() as u32 + 1;
    let col = column_offset(source, offset) as u32 + 1;
    (line, col)
}

// ============================================================================
// Tests
// ============================================================================
