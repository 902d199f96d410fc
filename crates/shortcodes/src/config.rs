//! Parser configuration.
//!
//! [`ParserConfig`] carries the delimiters and behaviour switches of a
//! [`Parser`](crate::Parser). Every field has a fixed default; nothing is
//! read from the environment.

use shortcodes_lexer::{DEFAULT_END, DEFAULT_ESCAPE, DEFAULT_START, Delimiters};

/// Settings for a [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```
/// use shortcodes::{Parser, ParserConfig};
///
/// let config = ParserConfig::default()
///     .with_delimiters("{{", "}}")
///     .with_ignore_unknown(true);
/// let parser = Parser::with_config(config).unwrap();
/// assert_eq!(parser.parse("keep {{ unknown }}").unwrap(), "keep {{ unknown }}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Marker opening a shortcode. Defaults to `[%`.
    pub start: String,
    /// Marker closing a shortcode. Defaults to `%]`.
    pub end: String,
    /// Marker that makes a following shortcode literal text. Defaults to `\`.
    pub esc: String,
    /// Keep unrecognised shortcodes as literal text instead of failing.
    /// Defaults to `false`.
    pub ignore_unknown: bool,
    /// Maximum number of simultaneously open block shortcodes; `None` means
    /// unlimited.
    pub max_depth: Option<usize>,
    /// Also resolve tags against the process-wide registry.
    pub global_handlers: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.to_owned(),
            end: DEFAULT_END.to_owned(),
            esc: DEFAULT_ESCAPE.to_owned(),
            ignore_unknown: false,
            max_depth: None,
            global_handlers: true,
        }
    }
}

impl ParserConfig {
    /// Use `start` and `end` as the shortcode markers.
    #[must_use]
    pub fn with_delimiters(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = start.into();
        self.end = end.into();
        self
    }

    /// Use `esc` as the escape marker.
    #[must_use]
    pub fn with_escape(mut self, esc: impl Into<String>) -> Self {
        self.esc = esc.into();
        self
    }

    /// Keep unrecognised shortcodes as literal text.
    #[must_use]
    pub fn with_ignore_unknown(mut self, ignore: bool) -> Self {
        self.ignore_unknown = ignore;
        self
    }

    /// Limit how deeply block shortcodes may nest.
    #[must_use]
    pub fn with_max_depth(mut self, limit: Option<usize>) -> Self {
        self.max_depth = limit;
        self
    }

    /// Choose whether the process-wide registry is consulted.
    #[must_use]
    pub fn with_global_handlers(mut self, enabled: bool) -> Self {
        self.global_handlers = enabled;
        self
    }

    /// The configured markers as lexer [`Delimiters`].
    #[must_use]
    pub fn delimiters(&self) -> Delimiters {
        Delimiters::new(self.start.as_str(), self.end.as_str(), self.esc.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_strict_and_global() {
        let config = ParserConfig::default();
        assert_eq!(config.delimiters(), Delimiters::default());
        assert!(!config.ignore_unknown);
        assert_eq!(config.max_depth, None);
        assert!(config.global_handlers);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn ignore_unknown_follows_the_builder(#[case] enabled: bool) {
        let config = ParserConfig::default().with_ignore_unknown(enabled);
        assert_eq!(config.ignore_unknown, enabled);
    }

    #[test]
    fn builders_set_fields() {
        let config = ParserConfig::default()
            .with_delimiters("<<", ">>")
            .with_escape("!")
            .with_max_depth(Some(3))
            .with_global_handlers(false);
        assert_eq!(config.delimiters(), Delimiters::new("<<", ">>", "!"));
        assert_eq!(config.max_depth, Some(3));
        assert!(!config.global_handlers);
    }
}
