//! Error types raised while preparing a tokenizer.

use thiserror::Error;

/// Errors surfaced when a set of delimiters cannot be turned into a
/// [`Tokenizer`](crate::Tokenizer).
///
/// # Examples
/// ```
/// use shortcodes_lexer::{DelimiterError, Delimiters};
///
/// let err = Delimiters::new("", "%]", "\\").compile().unwrap_err();
/// assert!(matches!(err, DelimiterError::Empty { name: "start" }));
/// assert_eq!(err.to_string(), "the start delimiter must not be empty");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DelimiterError {
    /// One of the configured markers was an empty string.
    #[error("the {name} delimiter must not be empty")]
    Empty {
        /// Which marker was empty: `start`, `end` or `escape`.
        name: &'static str,
    },
    /// The start and end markers were the same string.
    #[error("the start and end delimiters must differ (both are `{marker}`)")]
    Identical {
        /// The shared marker text.
        marker: String,
    },
    /// The generated tokenizer expression failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}
