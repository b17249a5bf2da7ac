//! The set of recognized parametrized-type head names, plus layout
//! constants.
//!
//! The registry is a static, explicitly enumerated list with no dynamic
//! discovery. Embedding applications extend it per call through
//! [`TypeRegistry::with_names`].

use std::collections::HashSet;

/// Column budget for the single-line layout rule.
pub const DEFAULT_WIDTH: usize = 110;

/// One indentation level of the multi-line layout.
pub const INDENT: &str = "    ";

/// Character width of [`INDENT`], added to the column offset on recursion.
pub const INDENT_WIDTH: usize = 4;

/// Head names treated as parametrized-type constructors.
///
/// Covers the union/optional/literal forms plus the standard typing
/// containers. `Callable` is listed because its argument-list position
/// takes the bracketed-group form.
pub const DEFAULT_NAMES: &[&str] = &[
    "Union",
    "Optional",
    "Literal",
    "Callable",
    "List",
    "Dict",
    "Tuple",
    "Set",
    "FrozenSet",
    "Type",
    "Mapping",
    "MutableMapping",
    "MutableSet",
    "MutableSequence",
    "Sequence",
    "Iterable",
    "Iterator",
    "Generator",
    "AsyncIterable",
    "AsyncIterator",
    "AsyncGenerator",
    "Awaitable",
    "Coroutine",
    "Counter",
    "ChainMap",
    "Deque",
    "DefaultDict",
    "OrderedDict",
    "KeysView",
    "ValuesView",
    "ItemsView",
    "AbstractSet",
    "Container",
    "Collection",
    "Reversible",
    "ContextManager",
    "AsyncContextManager",
];

/// Recognized parametrized-type head names.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    names: HashSet<&'static str>,
    extra: HashSet<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry {
            names: DEFAULT_NAMES.iter().copied().collect(),
            extra: HashSet::new(),
        }
    }
}

impl TypeRegistry {
    /// Extend the registry with additional head names.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether `name` is a recognized head name.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name) || self.extra.contains(name)
    }
}

// ============================================================================
// Tests
// ============================================================================
