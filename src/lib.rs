//! Span-preserving reformatting of Python source text.
//!
//! Two independent, pure passes over a source string:
//!
//! - [`reformat_generics`] re-prints recognized parametrized type
//!   expressions (`Union[...]`, `Dict[...]`, ...) with width-aware
//!   wrapping, one parameter per line when the expression does not fit.
//! - [`reformat_quotes`] normalizes plain string-literal delimiters so the
//!   chosen quote minimizes escaping, preferring double quotes.
//!
//! Both passes locate their targets by exact byte span and splice
//! replacements back into the original text, so every byte outside a
//! rewritten span survives untouched, comments and odd whitespace
//! included. Both fail closed: anything the focused tokenizer or the
//! subscript parser cannot handle leaves the input unchanged rather than
//! risking a bad rewrite.
//!
//! ```
//! use typefmt::reformat_quotes;
//!
//! assert_eq!(reformat_quotes("x = 'ok'\n"), "x = \"ok\"\n");
//! ```

pub mod diff;
pub mod error;
pub mod generics;
pub mod output;
pub mod quotes;
pub mod registry;
pub mod span;
pub mod splice;
pub mod tokenizer;

pub use error::{Result, RewriteError};
pub use generics::{reformat_generics, reformat_generics_with, GenericsOptions};
pub use quotes::reformat_quotes;
pub use registry::{TypeRegistry, DEFAULT_WIDTH};
pub use span::Span;
