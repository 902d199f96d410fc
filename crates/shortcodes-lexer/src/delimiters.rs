//! Marker strings that delimit shortcode tokens.

use regex::Regex;

use crate::errors::DelimiterError;
use crate::tokenizer::Tokenizer;

/// Default marker opening a shortcode token.
pub const DEFAULT_START: &str = "[%";
/// Default marker closing a shortcode token.
pub const DEFAULT_END: &str = "%]";
/// Default marker that, placed before a start marker, makes the whole token
/// literal text.
pub const DEFAULT_ESCAPE: &str = "\\";

/// The three literal markers recognised by the tokenizer.
///
/// Markers are plain strings; any regular-expression syntax they contain is
/// escaped before the tokenizer expression is built.
///
/// # Examples
/// ```
/// use shortcodes_lexer::Delimiters;
///
/// let delimiters = Delimiters::default();
/// assert_eq!(delimiters.start(), "[%");
/// assert_eq!(delimiters.end(), "%]");
/// assert_eq!(delimiters.escape(), "\\");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiters {
    start: String,
    end: String,
    escape: String,
}

impl Delimiters {
    /// Create a delimiter set from explicit markers.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>, escape: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            escape: escape.into(),
        }
    }

    /// Marker opening a shortcode token.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Marker closing a shortcode token.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Marker escaping a following start marker.
    #[must_use]
    pub fn escape(&self) -> &str {
        &self.escape
    }

    /// Check that the markers can delimit tokens unambiguously.
    ///
    /// # Errors
    /// Returns [`DelimiterError::Empty`] when any marker is empty and
    /// [`DelimiterError::Identical`] when start and end are the same.
    pub fn validate(&self) -> Result<(), DelimiterError> {
        for (name, marker) in [
            ("start", &self.start),
            ("end", &self.end),
            ("escape", &self.escape),
        ] {
            if marker.is_empty() {
                return Err(DelimiterError::Empty { name });
            }
        }
        if self.start == self.end {
            return Err(DelimiterError::Identical {
                marker: self.start.clone(),
            });
        }
        Ok(())
    }

    /// Build the anchoring expression source for these markers.
    ///
    /// The optional escape prefix is part of the match so that an escaped
    /// token is consumed whole. The span is lazy, so the nearest end marker
    /// closes the token, and `.` keeps a token on a single line.
    pub(crate) fn pattern(&self) -> String {
        format!(
            "(?:{})?{}.*?{}",
            regex::escape(&self.escape),
            regex::escape(&self.start),
            regex::escape(&self.end),
        )
    }

    /// Validate the markers and compile them into a [`Tokenizer`].
    ///
    /// # Errors
    /// Returns [`DelimiterError`] when validation fails or the generated
    /// expression cannot be compiled.
    pub fn compile(self) -> Result<Tokenizer, DelimiterError> {
        self.validate()?;
        let regex = Regex::new(&self.pattern())?;
        Ok(Tokenizer::new(self, regex))
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(DEFAULT_START, DEFAULT_END, DEFAULT_ESCAPE)
    }
}
