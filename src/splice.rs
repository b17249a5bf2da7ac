//! Merging rendered replacements back into the original text.
//!
//! The splicer walks replacements in ascending span order and copies every
//! byte outside the replaced spans verbatim. Replacement spans must be
//! disjoint; the walkers guarantee this because a match's interior is never
//! re-matched.

use crate::span::Span;

/// A rendered replacement for one span of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Span,
    pub text: String,
}

impl Replacement {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Replacement {
            span,
            text: text.into(),
        }
    }
}

/// Splice `replacements` (ascending, disjoint) into `source`.
///
/// With an empty replacement list this returns the source unchanged,
/// byte for byte.
pub fn splice(source: &str, replacements: &[Replacement]) -> String {
    debug_assert!(ascending_and_disjoint(replacements));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for rep in replacements {
        out.push_str(&source[cursor..rep.span.start]);
        out.push_str(&rep.text);
        cursor = rep.span.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Prefix every line after the first with one extra `indent` unit.
///
/// Used for matches inside a class body: the attribute's own line keeps
/// its position, continuation lines sit one level deeper.
pub fn indent_continuation_lines(text: &str, indent: &str) -> String {
    let mut lines = text.split('\n');
    let mut out = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        out.push_str(indent);
        out.push_str(line);
    }
    out
}

fn ascending_and_disjoint(replacements: &[Replacement]) -> bool {
    replacements
        .windows(2)
        .all(|w| w[0].span.end <= w[1].span.start)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_replacements_is_identity() {
        let source = "unchanged\ntext\n";
        assert_eq!(splice(source, &[]), source);
    }

    #[test]
    fn single_replacement() {
        let source = "x = old_value";
        let reps = vec![Replacement::new(Span::new(4, 13), "new")];
        assert_eq!(splice(source, &reps), "x = new");
    }

    #[test]
    fn multiple_replacements_preserve_between() {
        let source = "aaa bbb ccc";
        let reps = vec![
            Replacement::new(Span::new(0, 3), "AAA"),
            Replacement::new(Span::new(8, 11), "CCC"),
        ];
        assert_eq!(splice(source, &reps), "AAA bbb CCC");
    }

    #[test]
    fn adjacent_replacements() {
        let source = "abcd";
        let reps = vec![
            Replacement::new(Span::new(0, 2), "X"),
            Replacement::new(Span::new(2, 4), "Y"),
        ];
        assert_eq!(splice(source, &reps), "XY");
    }

    #[test]
    fn continuation_indent_leaves_first_line() {
        let text = "Union[\n    str,\n    ]";
        assert_eq!(
            indent_continuation_lines(text, "    "),
            "Union[\n        str,\n        ]"
        );
    }

    #[test]
    fn continuation_indent_single_line_unchanged() {
        assert_eq!(indent_continuation_lines("Union[str, int]", "    "), "Union[str, int]");
    }
}
