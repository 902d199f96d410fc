//! Error types returned by parsing and rendering.

use shortcodes_lexer::DelimiterError;
use thiserror::Error;

use crate::handler::HandlerError;

/// Unbalanced or mismatched block shortcodes.
///
/// # Examples
/// ```
/// use shortcodes::NestingError;
///
/// let err = NestingError::Mismatched {
///     expected: "endwrap".into(),
///     found: "endbox".into(),
/// };
/// assert_eq!(err.to_string(), "expecting 'endwrap', found 'endbox'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NestingError {
    /// An end-tag appeared while no block shortcode was open.
    #[error("not expecting '{found}'")]
    Unexpected {
        /// The end-tag that was found.
        found: String,
    },
    /// An end-tag closed a different block than the innermost open one.
    #[error("expecting '{expected}', found '{found}'")]
    Mismatched {
        /// End-tag of the innermost open block.
        expected: String,
        /// The end-tag that was found.
        found: String,
    },
    /// The input ended while a block shortcode was still open.
    #[error("expecting '{expected}'")]
    Unclosed {
        /// End-tag of the innermost open block.
        expected: String,
    },
    /// Opening another block would exceed the configured depth limit.
    #[error("block shortcodes nested deeper than {limit} levels")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

/// Failure reported when a handler panics instead of returning an error.
///
/// The renderer wraps it in [`ShortcodeError::Rendering`] like any other
/// handler failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("handler panicked: {message}")]
pub struct HandlerPanic {
    /// The formatted panic payload.
    pub message: String,
}

/// Errors surfaced by [`Parser`](crate::Parser).
///
/// Every variant aborts the whole parse; no partial output is produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShortcodeError {
    /// Block shortcodes were unbalanced or mismatched.
    #[error(transparent)]
    Nesting(#[from] NestingError),
    /// A tag matched neither a registered shortcode nor an end-tag.
    #[error("'{tag}' is not a recognised shortcode tag")]
    InvalidTag {
        /// The unrecognised tag.
        tag: String,
    },
    /// A handler returned an error or panicked.
    #[error("error rendering '{tag}' shortcode")]
    Rendering {
        /// Tag of the shortcode whose handler failed.
        tag: String,
        /// The failure reported by the handler.
        #[source]
        source: HandlerError,
    },
    /// The configured delimiters are unusable.
    #[error(transparent)]
    Config(#[from] DelimiterError),
}

impl ShortcodeError {
    /// Returns `true` for unbalanced or mismatched block shortcodes.
    #[must_use]
    pub fn is_nesting(&self) -> bool {
        matches!(self, Self::Nesting(_))
    }

    /// Returns `true` for unrecognised tags.
    #[must_use]
    pub fn is_invalid_tag(&self) -> bool {
        matches!(self, Self::InvalidTag { .. })
    }

    /// Returns `true` for handler failures.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        matches!(self, Self::Rendering { .. })
    }

    /// The tag the error is about, when it concerns a single tag.
    ///
    /// # Examples
    /// ```
    /// use shortcodes::ShortcodeError;
    ///
    /// let err = ShortcodeError::InvalidTag { tag: "nope".into() };
    /// assert_eq!(err.tag(), Some("nope"));
    /// ```
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::InvalidTag { tag } | Self::Rendering { tag, .. } => Some(tag),
            Self::Nesting(NestingError::Unexpected { found } | NestingError::Mismatched { found, .. }) => {
                Some(found)
            }
            Self::Nesting(_) | Self::Config(_) => None,
        }
    }
}
