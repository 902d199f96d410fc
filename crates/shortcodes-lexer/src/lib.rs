//! Lexing utilities shared by the shortcode parser.
//!
//! The crate splits raw text into shortcode, escaped and plain-text tokens
//! and lexes the argument strings found inside shortcode tokens. It has no
//! notion of registered handlers; tree building and rendering live in the
//! `shortcodes` crate.

mod args;
mod delimiters;
mod errors;
mod escape;
mod tokenizer;

pub use args::{Arguments, KeywordArgs, parse_arguments};
pub use delimiters::{DEFAULT_END, DEFAULT_ESCAPE, DEFAULT_START, Delimiters};
pub use errors::DelimiterError;
pub use escape::decode_escapes;
pub use tokenizer::{ShortcodeToken, Token, Tokenizer, Tokens};
