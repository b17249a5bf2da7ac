//! A focused Python token scanner with exact byte spans.
//!
//! This is the position provider for both rewrite passes. It is not a full
//! grammar: it recognizes exactly enough structure to let the walkers find
//! parametrized-type subscripts and string literals, and to tell suite
//! boundaries apart: names, strings (prefixes, triple quotes, escapes),
//! numbers, operator characters, logical newlines, and INDENT/DEDENT
//! synthesized from an indent stack. Newlines inside open brackets are
//! implicit continuations and produce no token, matching Python's own
//! tokenization. Everything the walkers do not care about still comes out
//! as a token so that spans tile the source exactly.

use memchr::memchr2;

use crate::error::{Result, RewriteError};
use crate::span::Span;

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokType {
    /// Identifier or keyword.
    Name,
    /// Numeric literal.
    Number,
    /// String or bytes literal, including any prefix and delimiters.
    String,
    /// A single operator or punctuation character (`...` is one token).
    Op,
    /// Logical end of line. Suppressed inside brackets.
    Newline,
    /// Indentation increased at the start of a logical line.
    Indent,
    /// Indentation decreased at the start of a logical line.
    Dedent,
    /// End of input.
    EndMarker,
}

/// A token with its exact byte span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokType,
    pub span: Span,
}

impl Token {
    /// The source text this token covers.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}

/// Tokenize the whole source.
///
/// The returned stream always ends with an [`TokType::EndMarker`] token,
/// preceded by one [`TokType::Dedent`] per still-open indent level.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Scanner::new(source).run()
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Byte widths of enclosing indentation levels. Always starts with 0.
    indents: Vec<usize>,
    /// Open `(`/`[`/`{` count; newlines are implicit continuations when > 0.
    depth: usize,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            indents: vec![0],
            depth: 0,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while self.pos < self.bytes.len() {
            if self.at_line_start && self.depth == 0 {
                self.scan_line_start()?;
                continue;
            }
            self.scan_token()?;
        }

        // Synthetic trailing newline for a final line without one.
        if !self.at_line_start {
            self.push_empty(TokType::Newline);
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push_empty(TokType::Dedent);
        }
        self.push_empty(TokType::EndMarker);
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokType, start: usize, end: usize) {
        self.tokens.push(Token {
            kind,
            span: Span::new(start, end),
        });
    }

    fn push_empty(&mut self, kind: TokType) {
        self.push(kind, self.pos, self.pos);
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, off: usize) -> Option<u8> {
        self.bytes.get(self.pos + off).copied()
    }

    /// Measure indentation and emit INDENT/DEDENT. Blank and comment-only
    /// lines are consumed whole and produce nothing, as in Python.
    fn scan_line_start(&mut self) -> Result<()> {
        let mut width = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\x0c' => {
                    self.pos += 1;
                    width += 1;
                }
                _ => break,
            }
        }

        match self.peek() {
            // Blank line
            None | Some(b'\n') | Some(b'\r') => {
                self.consume_line_end();
                return Ok(());
            }
            // Comment-only line
            Some(b'#') => {
                self.skip_comment();
                self.consume_line_end();
                return Ok(());
            }
            _ => {}
        }

        let current = *self.indents.last().unwrap_or(&0);
        if width > current {
            self.indents.push(width);
            self.push_empty(TokType::Indent);
        } else if width < current {
            while *self.indents.last().unwrap_or(&0) > width {
                self.indents.pop();
                self.push_empty(TokType::Dedent);
            }
            if *self.indents.last().unwrap_or(&0) != width {
                return Err(RewriteError::tokenize(
                    "inconsistent dedent",
                    self.pos,
                ));
            }
        }
        self.at_line_start = false;
        Ok(())
    }

    /// Consume `\n`, `\r` or `\r\n` if present (silently; used for blank
    /// lines and continuations).
    fn consume_line_end(&mut self) {
        match self.peek() {
            Some(b'\n') => self.pos += 1,
            Some(b'\r') => {
                self.pos += 1;
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            _ => {}
        }
        self.at_line_start = true;
    }

    fn skip_comment(&mut self) {
        // To the end of the physical line, newline excluded.
        match memchr2(b'\n', b'\r', &self.bytes[self.pos..]) {
            Some(i) => self.pos += i,
            None => self.pos = self.bytes.len(),
        }
    }

    fn scan_token(&mut self) -> Result<()> {
        let start = self.pos;
        let b = match self.peek() {
            Some(b) => b,
            None => return Ok(()),
        };

        match b {
            b' ' | b'\t' | b'\x0c' => {
                self.pos += 1;
            }
            b'#' => {
                self.skip_comment();
            }
            b'\n' | b'\r' => {
                if self.depth > 0 {
                    // Implicit continuation inside brackets
                    self.consume_line_end();
                    self.at_line_start = false;
                } else {
                    self.consume_line_end();
                    self.push(TokType::Newline, start, self.pos);
                }
            }
            b'\\' => {
                if matches!(self.peek_at(1), Some(b'\n') | Some(b'\r')) {
                    // Explicit line continuation
                    self.pos += 1;
                    self.consume_line_end();
                    self.at_line_start = false;
                } else {
                    self.pos += 1;
                    self.push(TokType::Op, start, self.pos);
                }
            }
            b'\'' | b'"' => {
                self.scan_string(start, false)?;
            }
            b'0'..=b'9' => {
                self.scan_number();
                self.push(TokType::Number, start, self.pos);
            }
            b'.' => {
                if self.peek_at(1) == Some(b'.') && self.peek_at(2) == Some(b'.') {
                    self.pos += 3;
                    self.push(TokType::Op, start, self.pos);
                } else if matches!(self.peek_at(1), Some(b'0'..=b'9')) {
                    self.scan_number();
                    self.push(TokType::Number, start, self.pos);
                } else {
                    self.pos += 1;
                    self.push(TokType::Op, start, self.pos);
                }
            }
            b'(' | b'[' | b'{' => {
                self.depth += 1;
                self.pos += 1;
                self.push(TokType::Op, start, self.pos);
            }
            b')' | b']' | b'}' => {
                self.depth = self.depth.saturating_sub(1);
                self.pos += 1;
                self.push(TokType::Op, start, self.pos);
            }
            _ => {
                let c = self.source[self.pos..].chars().next().unwrap_or('\0');
                if c == '_' || c.is_alphabetic() {
                    self.scan_name_or_prefixed_string(start)?;
                } else {
                    self.pos += c.len_utf8();
                    self.push(TokType::Op, start, self.pos);
                }
            }
        }
        Ok(())
    }

    fn scan_number(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'.' => {
                    let exponent = b == b'e' || b == b'E';
                    self.pos += 1;
                    if exponent && matches!(self.peek(), Some(b'+') | Some(b'-')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_name_or_prefixed_string(&mut self, start: usize) -> Result<()> {
        while self.pos < self.bytes.len() {
            let c = match self.source[self.pos..].chars().next() {
                Some(c) => c,
                None => break,
            };
            if c == '_' || c.is_alphanumeric() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }

        // A short identifier directly followed by a quote is a string prefix.
        let name = &self.source[start..self.pos];
        if matches!(self.peek(), Some(b'\'') | Some(b'"')) && is_string_prefix(name) {
            return self.scan_string(start, name.contains(['r', 'R']));
        }
        self.push(TokType::Name, start, self.pos);
        Ok(())
    }

    /// Scan a string literal. `self.pos` is at the opening quote; `start`
    /// is the beginning of the token (prefix included). Backslashes skip
    /// the following character even in raw strings, where they still keep
    /// a quote from terminating the literal.
    fn scan_string(&mut self, start: usize, _raw: bool) -> Result<()> {
        let quote = self.bytes[self.pos];
        self.pos += 1;

        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.pos += 2;
            loop {
                match self.peek() {
                    None => return Err(RewriteError::tokenize("unterminated string", start)),
                    Some(b'\\') => self.skip_escape(),
                    Some(b) if b == quote => {
                        if self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote) {
                            self.pos += 3;
                            break;
                        }
                        self.pos += 1;
                    }
                    Some(_) => {
                        let c = self.source[self.pos..].chars().next().unwrap_or('\0');
                        self.pos += c.len_utf8();
                    }
                }
            }
        } else {
            loop {
                match self.peek() {
                    None | Some(b'\n') | Some(b'\r') => {
                        return Err(RewriteError::tokenize("unterminated string", start));
                    }
                    Some(b'\\') => self.skip_escape(),
                    Some(b) if b == quote => {
                        self.pos += 1;
                        break;
                    }
                    Some(_) => {
                        let c = self.source[self.pos..].chars().next().unwrap_or('\0');
                        self.pos += c.len_utf8();
                    }
                }
            }
        }
        self.push(TokType::String, start, self.pos.min(self.bytes.len()));
        Ok(())
    }

    /// Step over a backslash and the full character it escapes, which may
    /// be multi-byte.
    fn skip_escape(&mut self) {
        self.pos += 1;
        if let Some(c) = self.source[self.pos..].chars().next() {
            self.pos += c.len_utf8();
        }
    }
}

/// Whether `name` is a valid Python string-literal prefix (`r`, `b`, `f`,
/// `u`, `t` and their combinations, any case).
fn is_string_prefix(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 3
        && name
            .chars()
            .all(|c| matches!(c, 'r' | 'R' | 'b' | 'B' | 'f' | 'F' | 'u' | 'U' | 't' | 'T'))
}

// ============================================================================
// Tests
// ============================================================================
