//! Content-sensitive normalization of string-literal delimiters.
//!
//! Independent from the generics pass. Every plain string literal is
//! located with its exact span and re-delimited under the policy:
//!
//! - empty literals normalize to `''`
//! - single-character content keeps single quotes, unless the character is
//!   itself a single quote (then double quotes, avoiding the escape)
//! - longer content prefers double quotes, switching to single quotes only
//!   when that strictly reduces escaping
//! - anything spanning lines, containing a newline (literal or escaped),
//!   or carrying a prefix (`f`, `r`, `b`, ...) is copied through unchanged
//!
//! Rewriting never changes line structure, so splicing needs no
//! indentation handling here.

use crate::error::Result;
use crate::span::Span;
use crate::splice::{splice, Replacement};
use crate::tokenizer::{tokenize, TokType};

/// A string literal scheduled for re-delimiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteMatch {
    pub span: Span,
    pub replacement: String,
}

/// One character of literal content, with whether it was written escaped.
type LogicalChar = (bool, char);

/// Normalize string-literal delimiters, copying everything else through
/// byte for byte.
///
/// Fails closed: if the source cannot be tokenized the input is returned
/// unchanged.
pub fn reformat_quotes(source: &str) -> String {
    splice(source, &plan_quotes(source))
}

/// The edit plan the quotes pass would splice: ascending, disjoint
/// replacements. Empty when nothing changes or when tokenization fails,
/// so splicing the plan is always safe.
pub fn plan_quotes(source: &str) -> Vec<Replacement> {
    match locate_quotes(source) {
        Ok(matches) => matches
            .into_iter()
            .map(|m| Replacement::new(m.span, m.replacement))
            .collect(),
        Err(err) => {
            tracing::debug!("quotes pass fell back to original source: {}", err);
            Vec::new()
        }
    }
}

/// Locate every string literal whose rendering under the policy differs
/// from its source text, in ascending span order.
fn locate_quotes(source: &str) -> Result<Vec<QuoteMatch>> {
    let tokens = tokenize(source)?;
    let mut matches = Vec::new();
    for tok in &tokens {
        if tok.kind != TokType::String {
            continue;
        }
        let text = tok.text(source);
        if let Some(rendered) = requote(text) {
            if rendered != text {
                matches.push(QuoteMatch {
                    span: tok.span,
                    replacement: rendered,
                });
            }
        }
    }
    Ok(matches)
}

/// Apply the quote policy to one literal's source text. `None` means copy
/// through unchanged.
fn requote(text: &str) -> Option<String> {
    // Degenerate two-byte literal: '' or ""
    if text.len() == 2 {
        return Some("''".to_string());
    }

    // Prefixed literals don't start with a quote character; leave them be.
    let quote = text.chars().next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }

    // Triple-quoted bodies are out of policy.
    let delim = quote.to_string();
    if text.starts_with(&delim.repeat(3)) {
        return None;
    }

    // Never touch a literal that spans lines or spells a newline.
    if text.contains('\n') || text.contains('\r') || text.contains("\\n") || text.contains("\\r") {
        return None;
    }

    let inner = &text[1..text.len() - 1];
    let chars = logical_chars(inner);
    let target = pick_delimiter(&chars);
    Some(render(&chars, target))
}

fn logical_chars(inner: &str) -> Vec<LogicalChar> {
    let mut out = Vec::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push((true, next)),
                None => out.push((false, '\\')),
            }
        } else {
            out.push((false, c));
        }
    }
    out
}

fn pick_delimiter(chars: &[LogicalChar]) -> char {
    if let [(_, only)] = chars {
        // Single character keeps single quotes, except a single quote
        // itself, which reads better double-quoted than escaped.
        return if *only == '\'' { '"' } else { '\'' };
    }

    // Whichever delimiter needs fewer escapes, double preferred on a tie.
    let doubles = chars.iter().filter(|(_, c)| *c == '"').count();
    let singles = chars.iter().filter(|(_, c)| *c == '\'').count();
    if doubles > singles {
        '\''
    } else {
        '"'
    }
}

fn render(chars: &[LogicalChar], quote: char) -> String {
    let mut out = String::with_capacity(chars.len() + 2);
    out.push(quote);
    for &(escaped, c) in chars {
        if c == quote {
            out.push('\\');
            out.push(c);
        } else if c == '\'' || c == '"' {
            // The non-delimiter quote needs no escape.
            out.push(c);
        } else if escaped {
            out.push('\\');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out.push(quote);
    out
}

// ============================================================================
// Tests
// ============================================================================
