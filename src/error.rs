//! The fail-closed error type shared by both rewrite passes.
//!
//! A rewrite pass never emits a partial result: any error raised while
//! decomposing or re-rendering a node is caught at the public entry point,
//! which then returns the pristine input text for that pass. The variants
//! here exist so the fallback can be logged with enough context to find
//! the offending construct.

use thiserror::Error;

/// Errors raised while locating or decomposing rewrite targets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    /// A node shape the tree builder does not know how to decompose,
    /// e.g. a dynamically-computed base in a dotted path.
    #[error("unsupported construct at byte {offset}: {construct}")]
    UnsupportedConstruct { construct: String, offset: usize },

    /// The token scanner could not make sense of the source,
    /// e.g. an unterminated string literal.
    #[error("tokenize error at byte {offset}: {message}")]
    Tokenize { message: String, offset: usize },
}

impl RewriteError {
    /// Create an `UnsupportedConstruct` error.
    pub fn unsupported(construct: impl Into<String>, offset: usize) -> Self {
        RewriteError::UnsupportedConstruct {
            construct: construct.into(),
            offset,
        }
    }

    /// Create a `Tokenize` error.
    pub fn tokenize(message: impl Into<String>, offset: usize) -> Self {
        RewriteError::Tokenize {
            message: message.into(),
            offset,
        }
    }
}

/// Result alias for rewrite operations.
pub type Result<T> = std::result::Result<T, RewriteError>;

// ============================================================================
// Tests
// ============================================================================
