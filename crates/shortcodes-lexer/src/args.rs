//! Argument lexing for the text that follows a shortcode tag.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::decode_escapes;

/// Keyword arguments of one shortcode, keyed by name.
pub type KeywordArgs = BTreeMap<String, String>;

// Alternatives are tried in order at each position: an optionally keyed
// quoted value, a keyed bare value, then a bare positional value.
#[expect(clippy::expect_used, reason = "the expression is a literal")]
fn argument_regex() -> Regex {
    Regex::new(
        r#"(?x)
            (?:(?P<qkey>[^\s'"=]+)=)?
            (?:
                "(?P<dq>(?:[^\\"]|\\.)*)"
              | '(?P<sq>(?:[^\\']|\\.)*)'
            )
          | (?P<key>[^\s'"=]+)=(?P<value>\S+)
          | (?P<bare>\S+)
        "#,
    )
    .expect("argument expression must compile")
}

static ARGUMENT: LazyLock<Regex> = LazyLock::new(argument_regex);

/// Positional and keyword arguments lexed from an argument string.
///
/// # Examples
/// ```
/// use shortcodes_lexer::parse_arguments;
///
/// let args = parse_arguments(r#" arg1 "arg 2" key1=arg3 key2='arg 4'"#);
/// assert_eq!(args.positional, ["arg1", "arg 2"]);
/// assert_eq!(args.keyword["key1"], "arg3");
/// assert_eq!(args.keyword["key2"], "arg 4");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    /// Arguments given without a key, in source order.
    pub positional: Vec<String>,
    /// Arguments given as `key=value`; a repeated key keeps its last value.
    pub keyword: KeywordArgs,
}

impl Arguments {
    /// Returns `true` when neither positional nor keyword arguments exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    fn push(&mut self, key: Option<&str>, value: String) {
        let Some(key) = key else {
            self.positional.push(value);
            return;
        };
        self.keyword.insert(key.to_owned(), value);
    }
}

fn lex_argument(caps: &Captures<'_>) -> (Option<String>, String) {
    if let Some(quoted) = caps.name("dq").or_else(|| caps.name("sq")) {
        let key = caps.name("qkey").map(|m| m.as_str().to_owned());
        return (key, decode_escapes(quoted.as_str()).into_owned());
    }
    if let (Some(key), Some(value)) = (caps.name("key"), caps.name("value")) {
        return (Some(key.as_str().to_owned()), value.as_str().to_owned());
    }
    let bare = caps.name("bare").map_or("", |m| m.as_str());
    (None, bare.to_owned())
}

/// Lex a shortcode argument string.
///
/// Each argument is one of, in order of preference:
///
/// - a quoted value, `"..."` or `'...'`, optionally prefixed by `key=`;
///   backslash escapes inside the quotes are decoded;
/// - `key=value` with an unquoted value, taken verbatim;
/// - a bare word, taken verbatim as a positional argument.
///
/// Text that matches none of these contributes nothing; lexing never fails.
///
/// # Examples
/// ```
/// use shortcodes_lexer::parse_arguments;
///
/// let args = parse_arguments(r#"arg1 "foo=bar=baz""#);
/// assert_eq!(args.positional, ["arg1", "foo=bar=baz"]);
/// assert!(args.keyword.is_empty());
/// ```
#[must_use]
pub fn parse_arguments(argstring: &str) -> Arguments {
    let mut args = Arguments::default();
    for caps in ARGUMENT.captures_iter(argstring) {
        let (key, value) = lex_argument(&caps);
        args.push(key.as_deref(), value);
    }
    args
}
