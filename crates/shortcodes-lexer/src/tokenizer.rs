//! Splits raw text into plain-text, escaped and shortcode tokens.

use regex::{Matches, Regex};

use crate::delimiters::Delimiters;

/// A compiled tokenizer for one set of [`Delimiters`].
///
/// Build it once with [`Delimiters::compile`] and reuse it for any number of
/// inputs; it holds no per-input state.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    delimiters: Delimiters,
    regex: Regex,
}

/// One segment of the input text.
///
/// The raw texts of the tokens produced for an input concatenate back to
/// that input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    /// Text outside any shortcode.
    Text(&'t str),
    /// A shortcode preceded by the escape marker, to be emitted literally.
    Escaped {
        /// The token as it appears in the input.
        raw: &'t str,
        /// The token with one escape marker removed from the front.
        literal: &'t str,
    },
    /// A delimited shortcode.
    Shortcode(ShortcodeToken<'t>),
}

impl<'t> Token<'t> {
    /// The token text exactly as it appears in the input.
    #[must_use]
    pub fn raw(&self) -> &'t str {
        match *self {
            Self::Text(text) => text,
            Self::Escaped { raw, .. } => raw,
            Self::Shortcode(token) => token.raw,
        }
    }
}

/// A shortcode token together with the text between its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcodeToken<'t> {
    raw: &'t str,
    content: &'t str,
}

impl<'t> ShortcodeToken<'t> {
    /// The token as it appears in the input, markers included.
    #[must_use]
    pub fn raw(&self) -> &'t str {
        self.raw
    }

    /// Content between the markers with surrounding whitespace removed.
    #[must_use]
    pub fn inner(&self) -> &'t str {
        self.content.trim()
    }

    /// Split the content into the tag and the argument string.
    ///
    /// The tag is the first whitespace-delimited word; the argument string
    /// is everything after it, leading whitespace included. Returns `None`
    /// when the token holds nothing but whitespace.
    ///
    /// # Examples
    /// ```
    /// use shortcodes_lexer::{Delimiters, Token};
    ///
    /// let tokenizer = Delimiters::default().compile().unwrap();
    /// let Some(Token::Shortcode(token)) = tokenizer.tokenize("[% wrap div  %]").next() else {
    ///     panic!("expected a shortcode token");
    /// };
    /// assert_eq!(token.split(), Some(("wrap", " div")));
    /// ```
    #[must_use]
    pub fn split(&self) -> Option<(&'t str, &'t str)> {
        let inner = self.inner();
        if inner.is_empty() {
            return None;
        }
        let tag_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
        Some(inner.split_at(tag_end))
    }
}

impl Tokenizer {
    pub(crate) fn new(delimiters: Delimiters, regex: Regex) -> Self {
        Self { delimiters, regex }
    }

    /// The markers this tokenizer was compiled from.
    #[must_use]
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Lazily split `text` into tokens.
    ///
    /// # Examples
    /// ```
    /// use shortcodes_lexer::{Delimiters, Token};
    ///
    /// let tokenizer = Delimiters::default().compile().unwrap();
    /// let raw: Vec<_> = tokenizer.tokenize("a [% b %] c").map(|t| t.raw()).collect();
    /// assert_eq!(raw, ["a ", "[% b %]", " c"]);
    /// ```
    #[must_use]
    pub fn tokenize<'r, 't>(&'r self, text: &'t str) -> Tokens<'r, 't> {
        Tokens {
            tokenizer: self,
            text,
            matches: self.regex.find_iter(text),
            cursor: 0,
            pending: None,
        }
    }

    fn classify<'t>(&self, raw: &'t str) -> Token<'t> {
        let start = self.delimiters.start();
        if let Some(literal) = raw.strip_prefix(self.delimiters.escape()) {
            if literal.starts_with(start) {
                return Token::Escaped { raw, literal };
            }
        }
        raw.strip_prefix(start)
            .and_then(|rest| rest.strip_suffix(self.delimiters.end()))
            .map_or(Token::Text(raw), |content| {
                Token::Shortcode(ShortcodeToken { raw, content })
            })
    }
}

/// Iterator over the tokens of one input, created by [`Tokenizer::tokenize`].
///
/// Empty segments are skipped, so consecutive shortcodes produce no empty
/// text token between them.
#[derive(Debug)]
pub struct Tokens<'r, 't> {
    tokenizer: &'r Tokenizer,
    text: &'t str,
    matches: Matches<'r, 't>,
    cursor: usize,
    pending: Option<regex::Match<'t>>,
}

impl<'t> Iterator for Tokens<'_, 't> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(found) = self.pending.take() {
            self.cursor = found.end();
            return Some(self.tokenizer.classify(found.as_str()));
        }
        if let Some(found) = self.matches.next() {
            let before = self.text.get(self.cursor..found.start()).unwrap_or_default();
            if before.is_empty() {
                self.cursor = found.end();
                return Some(self.tokenizer.classify(found.as_str()));
            }
            self.pending = Some(found);
            return Some(Token::Text(before));
        }
        let rest = self.text.get(self.cursor..).unwrap_or_default();
        self.cursor = self.text.len();
        (!rest.is_empty()).then_some(Token::Text(rest))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise tokenizer construction")]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token<'_>> {
        Delimiters::default()
            .compile()
            .unwrap()
            .tokenize(text)
            .collect::<Vec<_>>()
    }

    #[test]
    fn plain_text_is_a_single_token() {
        assert_eq!(tokens("just text"), vec![Token::Text("just text")]);
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokens("").is_empty());
    }

    #[test]
    fn matches_nearest_end_marker() {
        let found = tokens("[% a %][% b %]");
        let raw: Vec<_> = found.iter().map(Token::raw).collect();
        assert_eq!(raw, ["[% a %]", "[% b %]"]);
        assert!(found.iter().all(|t| matches!(t, Token::Shortcode(_))));
    }

    #[test]
    fn strips_one_escape_marker() {
        assert_eq!(
            tokens(r"\[% foo %]"),
            vec![Token::Escaped {
                raw: r"\[% foo %]",
                literal: "[% foo %]",
            }]
        );
    }

    #[test]
    fn double_escape_leaves_one_marker_as_text() {
        assert_eq!(
            tokens(r"\\[% foo %]"),
            vec![
                Token::Text("\\"),
                Token::Escaped {
                    raw: r"\[% foo %]",
                    literal: "[% foo %]",
                },
            ]
        );
    }

    #[test]
    fn unterminated_start_marker_is_text() {
        assert_eq!(tokens("a [% b"), vec![Token::Text("a [% b")]);
    }

    #[test]
    fn shortcodes_do_not_span_lines() {
        assert_eq!(tokens("[% a\n%]"), vec![Token::Text("[% a\n%]")]);
    }

    #[test]
    fn whitespace_only_token_has_no_tag() {
        let Some(Token::Shortcode(token)) = tokens("[%   %]").first().copied() else {
            panic!("expected a shortcode token");
        };
        assert_eq!(token.inner(), "");
        assert_eq!(token.split(), None);
    }

    #[test]
    fn splits_tag_from_arguments() {
        let Some(Token::Shortcode(token)) = tokens("[%  args a  b=c %]").first().copied() else {
            panic!("expected a shortcode token");
        };
        assert_eq!(token.inner(), "args a  b=c");
        assert_eq!(token.split(), Some(("args", " a  b=c")));
    }
}
