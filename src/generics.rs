//! Width-aware re-printing of parametrized type expressions.
//!
//! The pass finds every module-level and class-body-level subscript whose
//! head name is in the [`TypeRegistry`], decomposes it into a small tree
//! (`Generic` / `Group` / atoms), re-renders the tree against a column
//! budget, and splices the rendering back over the original span. Bodies
//! of `def` and `async def` are never entered: annotations inside a
//! callable belong to the line-wrapping formatter, not to this pass.
//!
//! Any shape the decomposition does not recognize aborts the whole pass;
//! the entry point then hands back the input untouched. A half-rewritten
//! file is never produced.

use crate::error::{Result, RewriteError};
use crate::registry::{TypeRegistry, DEFAULT_WIDTH, INDENT, INDENT_WIDTH};
use crate::span::{column_offset, Span};
use crate::splice::{indent_continuation_lines, splice, Replacement};
use crate::tokenizer::{tokenize, TokType, Token};

// ============================================================================
// Data model
// ============================================================================

/// One argument position inside a parametrized type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Already-rendered opaque text: an identifier, a dotted path, a
    /// re-quoted string literal, `...`, or `None`.
    Atom(String),
    /// A nested parametrized expression.
    Generic(Generic),
    /// A bracketed group (the argument-list position of `Callable`).
    Group(Group),
}

/// A named parametrized type expression, e.g. `Union[str, int]`.
///
/// `elements` is never empty: a bare name decomposes to an [`Element::Atom`],
/// not to a `Generic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generic {
    pub name: String,
    pub elements: Vec<Element>,
}

/// A nameless bracketed grouping, e.g. the `[str, int]` in
/// `Callable[[str, int], Any]`. May be empty (`Callable[[], Any]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub elements: Vec<Element>,
}

impl Element {
    fn one_line(&self) -> String {
        match self {
            Element::Atom(text) => text.clone(),
            Element::Generic(generic) => generic.one_line(),
            Element::Group(group) => group.one_line(),
        }
    }

    fn format(&self, col: usize, level: usize, width: usize) -> String {
        match self {
            Element::Atom(text) => text.clone(),
            Element::Generic(generic) => generic.format(col, level, width),
            Element::Group(group) => group.format(col, level, width),
        }
    }
}

impl Generic {
    fn one_line(&self) -> String {
        format!("{}[{}]", self.name, join_one_line(&self.elements))
    }

    /// Render at printed column `col`. Explodes to one element per line
    /// when the single-line form would overflow `width`.
    fn format(&self, col: usize, level: usize, width: usize) -> String {
        let single = self.one_line();
        if col + single.chars().count() <= width {
            return single;
        }
        exploded(&self.name, &self.elements, col, level, width)
    }
}

impl Group {
    fn one_line(&self) -> String {
        format!("[{}]", join_one_line(&self.elements))
    }

    fn format(&self, col: usize, level: usize, width: usize) -> String {
        let single = self.one_line();
        if col + single.chars().count() <= width || self.elements.is_empty() {
            return single;
        }
        exploded("", &self.elements, col, level, width)
    }
}

fn join_one_line(elements: &[Element]) -> String {
    elements
        .iter()
        .map(Element::one_line)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Multi-line layout: `name[`, one comma-terminated element per line one
/// level deeper, closing `]` back at the expression's own level.
fn exploded(name: &str, elements: &[Element], col: usize, level: usize, width: usize) -> String {
    let mut out = String::new();
    out.push_str(name);
    out.push_str("[\n");
    for element in elements {
        let rendered = element.format(col + INDENT_WIDTH, level + 1, width);
        out.push_str(&INDENT.repeat(level + 1));
        out.push_str(&rendered);
        out.push_str(",\n");
    }
    out.push_str(&INDENT.repeat(level));
    out.push(']');
    out
}

/// Where a match sits lexically; drives continuation-line indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchContext {
    /// True when the enclosing scope is a class body rather than module
    /// top level.
    pub inside_class_body: bool,
}

/// A located parametrized-type expression ready for re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericMatch {
    pub span: Span,
    pub generic: Generic,
    pub context: MatchContext,
}

// ============================================================================
// Node locator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suite {
    Def,
    Class,
    Other,
}

/// Walk the token stream and record every top-level registry match in
/// ascending source order. The interior of a match is consumed whole, so
/// recorded spans are disjoint by construction.
fn locate(source: &str, tokens: &[Token], registry: &TypeRegistry) -> Result<Vec<GenericMatch>> {
    let mut matches = Vec::new();
    let mut suites: Vec<Suite> = Vec::new();
    // Set on a `def`/`class` keyword, consumed by the suite's INDENT.
    let mut pending: Option<Suite> = None;
    let mut at_stmt_start = true;

    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        match tok.kind {
            TokType::Indent => {
                suites.push(pending.take().unwrap_or(Suite::Other));
                at_stmt_start = true;
            }
            TokType::Dedent => {
                suites.pop();
                at_stmt_start = true;
            }
            TokType::Newline => {
                at_stmt_start = true;
                // One-line suite: `def f(): ...` ends at its newline when
                // no INDENT follows.
                if pending.is_some() {
                    if let Some(next) = tokens.get(i + 1) {
                        if next.kind != TokType::Indent {
                            pending = None;
                        }
                    }
                }
            }
            TokType::Name => {
                let text = tok.text(source);
                let in_def = suites.contains(&Suite::Def);
                if at_stmt_start && (text == "def" || is_async_def(source, tokens, i)) {
                    pending = Some(Suite::Def);
                } else if at_stmt_start && text == "class" {
                    pending = Some(Suite::Class);
                } else if !in_def
                    && pending.is_none()
                    && registry.contains(text)
                    && is_op(source, tokens.get(i + 1), "[")
                {
                    let head_start = dotted_head_start(source, tokens, i)?;
                    let mut parser = SubscriptParser {
                        source,
                        tokens,
                        i: i + 1,
                    };
                    let name = dotted_name(source, tokens, head_start, i);
                    let generic = parser.parse_generic(name)?;
                    let end = tokens[parser.i - 1].span.end;
                    reject_dropped_comments(source, &tokens[head_start..parser.i])?;
                    matches.push(GenericMatch {
                        span: Span::new(tokens[head_start].span.start, end),
                        generic,
                        context: MatchContext {
                            inside_class_body: suites.contains(&Suite::Class),
                        },
                    });
                    at_stmt_start = false;
                    i = parser.i;
                    continue;
                }
                at_stmt_start = false;
            }
            _ => at_stmt_start = false,
        }
        i += 1;
    }

    Ok(matches)
}

fn is_async_def(source: &str, tokens: &[Token], i: usize) -> bool {
    tokens[i].text(source) == "async"
        && tokens
            .get(i + 1)
            .is_some_and(|t| t.kind == TokType::Name && t.text(source) == "def")
}

fn is_op(source: &str, token: Option<&Token>, op: &str) -> bool {
    token.is_some_and(|t| t.kind == TokType::Op && t.text(source) == op)
}

/// Walk back over `name .` pairs to the start of the dotted head path.
///
/// A dot whose base is not a plain name (a call or subscript result) has
/// no static dotted form and aborts the pass.
fn dotted_head_start(source: &str, tokens: &[Token], i: usize) -> Result<usize> {
    let mut j = i;
    while j >= 1 && is_op(source, tokens.get(j - 1), ".") {
        if j >= 2 && tokens[j - 2].kind == TokType::Name {
            j -= 2;
        } else {
            return Err(RewriteError::unsupported(
                "attribute access on a non-name base",
                tokens[i].span.start,
            ));
        }
    }
    Ok(j)
}

/// The tokenizer drops comments without a token, so a `#` in the gap
/// between two of a match's tokens is text the re-render would silently
/// delete. Comments only ever sit between tokens; inside a string they
/// are part of the token's span.
fn reject_dropped_comments(source: &str, tokens: &[Token]) -> Result<()> {
    for pair in tokens.windows(2) {
        let gap = &source[pair[0].span.end..pair[1].span.start];
        if let Some(at) = gap.find('#') {
            return Err(RewriteError::unsupported(
                "comment inside subscript",
                pair[0].span.end + at,
            ));
        }
    }
    Ok(())
}

/// Join the `name (. name)*` tokens from `start` through `end` inclusive.
fn dotted_name(source: &str, tokens: &[Token], start: usize, end: usize) -> String {
    let mut name = String::new();
    let mut j = start;
    while j <= end {
        name.push_str(tokens[j].text(source));
        if j < end {
            name.push('.');
        }
        j += 2;
    }
    name
}

// ============================================================================
// Generic-tree builder
// ============================================================================

struct SubscriptParser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    i: usize,
}

impl SubscriptParser<'_> {
    fn parse_generic(&mut self, name: String) -> Result<Generic> {
        let elements = self.parse_bracketed(false)?;
        Ok(Generic { name, elements })
    }

    /// Consume `[ element (, element)* ,? ]`. Only the group position of a
    /// callable may be empty.
    fn parse_bracketed(&mut self, allow_empty: bool) -> Result<Vec<Element>> {
        self.expect_op("[")?;
        let mut elements = Vec::new();

        if allow_empty && self.at_op("]") {
            self.i += 1;
            return Ok(elements);
        }

        loop {
            elements.push(self.parse_element()?);
            if self.at_op(",") {
                self.i += 1;
                if self.at_op("]") {
                    self.i += 1;
                    break;
                }
            } else if self.at_op("]") {
                self.i += 1;
                break;
            } else {
                return Err(self.unsupported_here("token inside subscript"));
            }
        }
        Ok(elements)
    }

    fn parse_element(&mut self) -> Result<Element> {
        let tok = match self.tokens.get(self.i) {
            Some(tok) => *tok,
            None => return Err(RewriteError::unsupported("unclosed subscript", self.source.len())),
        };
        match tok.kind {
            TokType::Name => {
                let path = self.parse_dotted_path()?;
                if self.at_op("[") {
                    Ok(Element::Generic(self.parse_generic(path)?))
                } else {
                    Ok(Element::Atom(path))
                }
            }
            TokType::String => {
                self.i += 1;
                Ok(Element::Atom(double_quoted_atom(tok.text(self.source))))
            }
            TokType::Op => match tok.text(self.source) {
                "..." => {
                    self.i += 1;
                    Ok(Element::Atom("...".to_string()))
                }
                "[" => Ok(Element::Group(Group {
                    elements: self.parse_bracketed(true)?,
                })),
                _ => Err(self.unsupported_here("operator inside subscript")),
            },
            _ => Err(self.unsupported_here("token inside subscript")),
        }
    }

    /// `name (. name)*`, joined with dots. The base of every dot must be a
    /// plain name.
    fn parse_dotted_path(&mut self) -> Result<String> {
        let mut path = self.tokens[self.i].text(self.source).to_string();
        self.i += 1;
        while self.at_op(".") {
            let next = self.tokens.get(self.i + 1);
            match next {
                Some(t) if t.kind == TokType::Name => {
                    path.push('.');
                    path.push_str(t.text(self.source));
                    self.i += 2;
                }
                _ => return Err(self.unsupported_here("attribute access on a non-name base")),
            }
        }
        Ok(path)
    }

    fn at_op(&self, op: &str) -> bool {
        is_op(self.source, self.tokens.get(self.i), op)
    }

    fn expect_op(&mut self, op: &str) -> Result<()> {
        if self.at_op(op) {
            self.i += 1;
            Ok(())
        } else {
            Err(self.unsupported_here("token inside subscript"))
        }
    }

    fn unsupported_here(&self, what: &str) -> RewriteError {
        match self.tokens.get(self.i) {
            Some(tok) => RewriteError::unsupported(
                format!("{}: {:?}", what, tok.text(self.source)),
                tok.span.start,
            ),
            None => RewriteError::unsupported(what, self.source.len()),
        }
    }
}

/// Re-render a string/bytes literal token as a double-quoted atom of its
/// content. Quote escapes are normalized for the new delimiter; all other
/// escape sequences pass through untouched.
fn double_quoted_atom(literal: &str) -> String {
    let inner = literal_content(literal);
    let mut out = String::with_capacity(inner.len() + 2);
    out.push('"');
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some('"') => out.push_str("\\\""),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// The characters between a literal's delimiters, prefix stripped,
/// escapes left as written.
fn literal_content(literal: &str) -> &str {
    let body = literal.trim_start_matches(|c: char| !matches!(c, '\'' | '"'));
    for delim in ["'''", "\"\"\"", "'", "\""] {
        if body.len() >= delim.len() * 2 && body.starts_with(delim) && body.ends_with(delim) {
            return &body[delim.len()..body.len() - delim.len()];
        }
    }
    body
}

// ============================================================================
// Entry points
// ============================================================================

/// Options for the generics pass.
#[derive(Debug, Clone)]
pub struct GenericsOptions {
    /// Column budget for the single-line layout rule.
    pub width: usize,
    /// Recognized head names.
    pub registry: TypeRegistry,
}

impl Default for GenericsOptions {
    fn default() -> Self {
        GenericsOptions {
            width: DEFAULT_WIDTH,
            registry: TypeRegistry::default(),
        }
    }
}

/// Re-print recognized parametrized type expressions with width-aware
/// wrapping, copying everything else through byte for byte.
///
/// Fails closed: on any unsupported construct the input is returned
/// unchanged.
pub fn reformat_generics(source: &str) -> String {
    reformat_generics_with(source, &GenericsOptions::default())
}

/// [`reformat_generics`] with an explicit width budget and registry.
pub fn reformat_generics_with(source: &str, options: &GenericsOptions) -> String {
    splice(source, &plan_generics_with(source, options))
}

/// The edit plan the generics pass would splice: ascending, disjoint
/// replacements. Empty both when nothing matches and when the pass falls
/// back, so splicing the plan is always safe.
pub fn plan_generics_with(source: &str, options: &GenericsOptions) -> Vec<Replacement> {
    match try_plan(source, options) {
        Ok(replacements) => replacements,
        Err(err) => {
            tracing::debug!("generics pass fell back to original source: {}", err);
            Vec::new()
        }
    }
}

fn try_plan(source: &str, options: &GenericsOptions) -> Result<Vec<Replacement>> {
    let tokens = tokenize(source)?;
    let matches = locate(source, &tokens, &options.registry)?;

    let mut replacements = Vec::with_capacity(matches.len());
    for m in &matches {
        let col = column_offset(source, m.span.start);
        let mut text = m.generic.format(col, 0, options.width);
        if m.context.inside_class_body {
            text = indent_continuation_lines(&text, INDENT);
        }
        replacements.push(Replacement::new(m.span, text));
    }
    Ok(replacements)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn locate_all(source: &str) -> Vec<GenericMatch> {
        let tokens = tokenize(source).expect("tokenize error");
        locate(source, &tokens, &TypeRegistry::default()).expect("locate error")
    }

    mod locator {
        use super::*;

        #[test]
        fn finds_module_level_match() {
            let matches = locate_all("x = Union[str, int]\n");
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].span, Span::new(4, 19));
            assert!(!matches[0].context.inside_class_body);
        }

        #[test]
        fn nested_generics_are_one_match() {
            let matches = locate_all("x = Optional[Union[str, List[int]]]\n");
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].generic.name, "Optional");
        }

        #[test]
        fn skips_def_bodies_and_signatures() {
            let source = "def f(x: Union[str, int]) -> Optional[int]:\n    y: List[str] = []\n    return None\n";
            assert!(locate_all(source).is_empty());
        }

        #[test]
        fn skips_async_def_bodies() {
            let source = "async def f():\n    x: Dict[str, int] = {}\n";
            assert!(locate_all(source).is_empty());
        }

        #[test]
        fn skips_one_line_def() {
            let source = "def f(): return List[int]\nx = List[str]\n";
            let matches = locate_all(source);
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].generic.name, "List");
            assert_eq!(matches[0].span.slice(source), "List[str]");
        }

        #[test]
        fn matches_resume_after_def() {
            let source = "a = List[int]\ndef f():\n    b = List[int]\nc = List[str]\n";
            let matches = locate_all(source);
            assert_eq!(matches.len(), 2);
            assert!(matches[0].span.start < matches[1].span.start);
        }

        #[test]
        fn tags_class_body_matches() {
            let source = "class Foo:\n    dtype = Literal[\"a\", \"b\"]\n";
            let matches = locate_all(source);
            assert_eq!(matches.len(), 1);
            assert!(matches[0].context.inside_class_body);
        }

        #[test]
        fn nested_class_bodies_keep_tag() {
            let source = "class A:\n    class B:\n        x = List[int]\n";
            let matches = locate_all(source);
            assert_eq!(matches.len(), 1);
            assert!(matches[0].context.inside_class_body);
        }

        #[test]
        fn def_inside_class_is_skipped() {
            let source = "class A:\n    def m(self):\n        x = List[int]\n    y = List[str]\n";
            let matches = locate_all(source);
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].span.slice(source), "List[str]");
        }

        #[test]
        fn dotted_head_spans_whole_path() {
            let source = "x = typing.Union[str, int]\n";
            let matches = locate_all(source);
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].span.slice(source), "typing.Union[str, int]");
            assert_eq!(matches[0].generic.name, "typing.Union");
        }

        #[test]
        fn unregistered_heads_ignored() {
            assert!(locate_all("x = ndarray[int]\nd = data[0]\n").is_empty());
        }

        #[test]
        fn spans_ascending_and_disjoint() {
            let source = "a = List[int]\nb = Dict[str, int]\nc = Set[bytes]\n";
            let matches = locate_all(source);
            assert_eq!(matches.len(), 3);
            for pair in matches.windows(2) {
                assert!(pair[0].span.end <= pair[1].span.start);
                assert!(!pair[0].span.overlaps(&pair[1].span));
            }
        }
    }

    mod builder {
        use super::*;

        fn build(source: &str) -> Result<Generic> {
            let tokens = tokenize(source)?;
            let matches = locate(source, &tokens, &TypeRegistry::default())?;
            Ok(matches.into_iter().next().expect("no match").generic)
        }

        #[test]
        fn atoms_and_nesting() {
            let generic = build("x = Union[str, List[int], None]\n").unwrap();
            assert_eq!(generic.name, "Union");
            assert_eq!(generic.elements.len(), 3);
            assert_eq!(generic.elements[0], Element::Atom("str".into()));
            assert!(matches!(generic.elements[1], Element::Generic(_)));
            assert_eq!(generic.elements[2], Element::Atom("None".into()));
        }

        #[test]
        fn callable_group_list() {
            let generic = build("x = Callable[[str, int], Any]\n").unwrap();
            match &generic.elements[0] {
                Element::Group(group) => assert_eq!(group.elements.len(), 2),
                other => panic!("expected group, got {:?}", other),
            }
        }

        #[test]
        fn empty_callable_group() {
            let generic = build("x = Callable[[], Any]\n").unwrap();
            match &generic.elements[0] {
                Element::Group(group) => assert!(group.elements.is_empty()),
                other => panic!("expected group, got {:?}", other),
            }
        }

        #[test]
        fn ellipsis_atom() {
            let generic = build("x = Tuple[int, ...]\n").unwrap();
            assert_eq!(generic.elements[1], Element::Atom("...".into()));
        }

        #[test]
        fn string_atoms_requoted_double() {
            let generic = build("x = Literal['a', \"b\"]\n").unwrap();
            assert_eq!(generic.elements[0], Element::Atom("\"a\"".into()));
            assert_eq!(generic.elements[1], Element::Atom("\"b\"".into()));
        }

        #[test]
        fn dotted_path_atom() {
            let generic = build("x = List[np.int64]\n").unwrap();
            assert_eq!(generic.elements[0], Element::Atom("np.int64".into()));
        }

        #[test]
        fn trailing_comma_accepted() {
            let generic = build("x = Union[str, int,]\n").unwrap();
            assert_eq!(generic.elements.len(), 2);
        }

        #[test]
        fn number_literal_unsupported() {
            let err = build("x = Literal[5]\n").unwrap_err();
            assert!(matches!(err, RewriteError::UnsupportedConstruct { .. }));
        }

        #[test]
        fn call_base_attribute_unsupported() {
            let source = "x = factory().Union[str, int]\n";
            let tokens = tokenize(source).unwrap();
            let err = locate(source, &tokens, &TypeRegistry::default()).unwrap_err();
            assert!(matches!(err, RewriteError::UnsupportedConstruct { .. }));
        }
    }

    mod layout {
        use super::*;

        fn atom(text: &str) -> Element {
            Element::Atom(text.to_string())
        }

        #[test]
        fn short_expression_stays_single_line() {
            let generic = Generic {
                name: "Union".into(),
                elements: vec![atom("str"), atom("int"), atom("float")],
            };
            assert_eq!(generic.format(0, 0, DEFAULT_WIDTH), "Union[str, int, float]");
        }

        #[test]
        fn offset_pushes_over_budget() {
            let generic = Generic {
                name: "Union".into(),
                elements: vec![atom("str"), atom("int")],
            };
            // 15 chars; fits at offset 95, overflows at 96
            assert_eq!(generic.format(95, 0, DEFAULT_WIDTH), "Union[str, int]");
            assert_eq!(
                generic.format(96, 0, DEFAULT_WIDTH),
                "Union[\n    str,\n    int,\n]"
            );
        }

        #[test]
        fn long_expression_explodes_one_per_line() {
            // 21 five-char names: 152 printed columns single-line
            let elements: Vec<Element> = (0..21).map(|_| atom("float")).collect();
            let generic = Generic {
                name: "Tuple".into(),
                elements,
            };
            let rendered = generic.format(0, 0, DEFAULT_WIDTH);
            let lines: Vec<&str> = rendered.lines().collect();
            assert_eq!(lines.len(), 23);
            assert_eq!(lines[0], "Tuple[");
            assert!(lines[1..22].iter().all(|line| *line == "    float,"));
            assert_eq!(lines[22], "]");
        }

        #[test]
        fn nested_offset_composes() {
            // Inner expression fits alone but not once the indent level's
            // offset is added.
            let inner = Generic {
                name: "Union".into(),
                elements: vec![atom("a".repeat(50).as_str()), atom("b".repeat(49).as_str())],
            };
            let outer = Generic {
                name: "Optional".into(),
                elements: vec![Element::Generic(inner)],
            };
            let rendered = outer.format(0, 0, DEFAULT_WIDTH);
            // Inner single-line is 108 chars; at the nested offset of 4 it
            // overflows and explodes too.
            assert_eq!(
                rendered,
                format!(
                    "Optional[\n    Union[\n        {},\n        {},\n    ],\n]",
                    "a".repeat(50),
                    "b".repeat(49)
                )
            );
        }

        #[test]
        fn group_renders_nameless() {
            let group = Group {
                elements: vec![atom("str"), atom("int")],
            };
            assert_eq!(group.one_line(), "[str, int]");
        }
    }

    mod requoting {
        use super::*;

        #[test]
        fn plain_single_to_double() {
            assert_eq!(double_quoted_atom("'abc'"), "\"abc\"");
        }

        #[test]
        fn double_stays_double() {
            assert_eq!(double_quoted_atom("\"abc\""), "\"abc\"");
        }

        #[test]
        fn escaped_single_unescaped() {
            assert_eq!(double_quoted_atom(r"'don\'t'"), "\"don't\"");
        }

        #[test]
        fn inner_double_escaped() {
            assert_eq!(double_quoted_atom("'say \"hi\"'"), r#""say \"hi\"""#);
        }

        #[test]
        fn bytes_prefix_stripped() {
            assert_eq!(double_quoted_atom("b'abc'"), "\"abc\"");
        }
    }

    mod entry_point {
        use super::*;

        #[test]
        fn no_match_is_byte_identical() {
            let source = "x = 1\ny = compute(x)\n# comment\n";
            assert_eq!(reformat_generics(source), source);
        }

        #[test]
        fn short_rewrite_normalizes_spacing() {
            assert_eq!(
                reformat_generics("x = Union[str,int]\n"),
                "x = Union[str, int]\n"
            );
        }

        #[test]
        fn fallback_on_unsupported() {
            let source = "x = Literal[5]\ny = Union[str, int]\n";
            assert_eq!(reformat_generics(source), source);
        }

        #[test]
        fn comment_inside_subscript_aborts_the_pass() {
            // The tokenizer drops comments; rewriting here would lose one.
            let source = "x = Union[str,  # keep me\n    int]\n";
            assert_eq!(reformat_generics(source), source);
        }

        #[test]
        fn class_body_continuation_indented_deeper() {
            let elements = "\"sphinx_rtd_theme\", \"sphinx-rtd-theme\", \"alabaster\", \"repo_helper_sphinx_theme\", \"repo-helper-sphinx-theme\", \"domdf_sphinx_theme\"";
            let module = format!("dtype = Literal[{}]\n", elements);
            let in_class = format!("class Foo:\n    dtype = Literal[{}]\n", elements);

            let module_out = reformat_generics(&module);
            let class_out = reformat_generics(&in_class);

            assert!(module_out.contains("Literal[\n    \"sphinx_rtd_theme\","));
            assert!(class_out.contains("Literal[\n        \"sphinx_rtd_theme\","));
            // Closing bracket: module at level 0, class body one deeper
            assert!(module_out.ends_with("\n]\n"));
            assert!(class_out.ends_with("\n    ]\n"));
        }

        #[test]
        fn idempotent_on_exploded_output() {
            let source = "_Convertible = Union[type, ParamType, Tuple[Union[type, ParamType], ...], Callable[[str], Any], Callable[[Optional[str]], Any]]\n";
            let once = reformat_generics(source);
            let twice = reformat_generics(&once);
            assert_ne!(once, source);
            assert_eq!(once, twice);
        }

        #[test]
        fn custom_width() {
            let options = GenericsOptions {
                width: 20,
                registry: TypeRegistry::default(),
            };
            assert_eq!(
                reformat_generics_with("x = Union[str, int, float]\n", &options),
                "x = Union[\n    str,\n    int,\n    float,\n]\n"
            );
        }

        #[test]
        fn extended_registry() {
            let options = GenericsOptions {
                width: DEFAULT_WIDTH,
                registry: TypeRegistry::default().with_names(["Annotated"]),
            };
            assert_eq!(
                reformat_generics_with("x = Annotated[int,CustomInfo]\n", &options),
                "x = Annotated[int, CustomInfo]\n"
            );
        }
    }
}
