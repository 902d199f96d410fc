//! Core library for `shortcodes`.
//!
//! The crate renders text containing delimited shortcodes such as
//! `[% wrap div %]text[% endwrap %]`. Each shortcode names a handler in a
//! registry; block shortcodes enclose content that is rendered first and
//! handed to the handler, so the innermost shortcodes are evaluated first.
//!
//! Handlers come from two places: the process-wide registry populated with
//! the [`shortcode!`] macro, and the per-parser registry populated with
//! [`Parser::register`]. Parser registrations shadow global ones.
//!
//! # Examples
//!
//! ```
//! use shortcodes::Parser;
//!
//! let mut parser = Parser::new();
//! parser
//!     .register("name", None, |_, _, _, _| Ok("world".to_owned()))
//!     .register("em", Some("endem"), |_, content, _, _| {
//!         Ok(format!("<em>{}</em>", content.unwrap_or_default()))
//!     });
//!
//! let html = parser.parse("Hello [% em %][% name %][% endem %]!").unwrap();
//! assert_eq!(html, "Hello <em>world</em>!");
//! ```

mod builder;
mod config;
mod error;
mod handler;
mod node;
mod panic;
mod parser;
pub mod registry;
mod render;

#[doc(hidden)]
pub use inventory::{iter, submit};

pub use config::ParserConfig;
pub use error::{HandlerPanic, NestingError, ShortcodeError};
pub use handler::{Handler, HandlerError, HandlerFn, HandlerResult};
pub use node::{Document, Node, Shortcode};
pub use panic::panic_message;
pub use parser::Parser;
#[cfg(feature = "diagnostics")]
pub use registry::dump_registry;
pub use registry::{GlobalShortcode, Registration, Registry, global_registry};
pub use shortcodes_lexer::{Arguments, DelimiterError, Delimiters, KeywordArgs};
