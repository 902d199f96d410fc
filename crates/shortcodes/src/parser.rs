//! The parser tying tokenizer, tree builder and renderer together.

use std::any::Any;
use std::sync::LazyLock;

use shortcodes_lexer::{Delimiters, KeywordArgs, Tokenizer};

use crate::builder::TreeBuilder;
use crate::config::ParserConfig;
use crate::error::ShortcodeError;
use crate::handler::HandlerResult;
use crate::node::Document;
use crate::registry::{Registry, Scope, global_registry};

#[expect(clippy::expect_used, reason = "the default delimiters are constants")]
fn default_tokenizer() -> Tokenizer {
    Delimiters::default()
        .compile()
        .expect("default delimiters must compile")
}

static DEFAULT_TOKENIZER: LazyLock<Tokenizer> = LazyLock::new(default_tokenizer);

/// Parses text containing shortcodes and renders it with registered
/// handlers.
///
/// A parser can be reused for any number of inputs. Each call to
/// [`parse`](Self::parse) builds a fresh tree, so results never depend on
/// earlier calls. Parsing only needs `&self`, so one parser can serve
/// several threads at once; registering needs `&mut self`.
///
/// # Examples
///
/// ```
/// use shortcodes::Parser;
///
/// let mut parser = Parser::new();
/// parser.register("wrap", Some("endwrap"), |_, content, args, _| {
///     let tag = args.first().map_or("span", String::as_str);
///     Ok(format!("<{tag}>{}</{tag}>", content.unwrap_or_default()))
/// });
///
/// let out = parser.parse("[% wrap div %][% wrap p %]hi[% endwrap %][% endwrap %]").unwrap();
/// assert_eq!(out, "<div><p>hi</p></div>");
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    tokenizer: Tokenizer,
    registry: Registry,
}

impl Parser {
    /// Create a parser with the default configuration and no instance
    /// registrations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            tokenizer: DEFAULT_TOKENIZER.clone(),
            registry: Registry::new(),
        }
    }

    /// Create a parser from `config`.
    ///
    /// # Errors
    /// Returns [`ShortcodeError::Config`] when the configured delimiters are
    /// empty or the start and end markers coincide.
    pub fn with_config(config: ParserConfig) -> Result<Self, ShortcodeError> {
        Self::with_registry(config, Registry::new())
    }

    /// Create a parser from `config` that owns a prepared `registry`.
    ///
    /// # Errors
    /// Returns [`ShortcodeError::Config`] when the configured delimiters are
    /// unusable.
    pub fn with_registry(config: ParserConfig, registry: Registry) -> Result<Self, ShortcodeError> {
        let tokenizer = config.delimiters().compile()?;
        Ok(Self {
            config,
            tokenizer,
            registry,
        })
    }

    /// Register a handler for `tag` on this parser only.
    ///
    /// Supplying `end_tag` makes the shortcode block-scoped. Instance
    /// registrations take precedence over global ones with the same tag.
    pub fn register<F>(&mut self, tag: impl Into<String>, end_tag: Option<&str>, handler: F) -> &mut Self
    where
        F: Fn(&dyn Any, Option<&str>, &[String], &KeywordArgs) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.registry.register(tag, end_tag, handler);
        self
    }

    /// The parser's own registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the parser's own registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The configuration the parser was built from.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn scope(&self) -> Scope<'_> {
        let global = self.config.global_handlers.then(global_registry);
        Scope::new(&self.registry, global)
    }

    /// Parse `text` into a document tree without rendering it.
    ///
    /// # Errors
    /// Returns [`ShortcodeError::Nesting`] for unbalanced block shortcodes
    /// and [`ShortcodeError::InvalidTag`] for unrecognised tags unless
    /// `ignore_unknown` is set.
    pub fn build<'p, 't>(&'p self, text: &'t str) -> Result<Document<'p, 't>, ShortcodeError> {
        let mut builder = TreeBuilder::new(
            self.scope(),
            self.config.ignore_unknown,
            self.config.max_depth,
        );
        for token in self.tokenizer.tokenize(text) {
            builder.push(token)?;
        }
        builder.finish()
    }

    /// Parse and render `text` with the unit value as context.
    ///
    /// # Errors
    /// See [`parse_with_context`](Self::parse_with_context).
    pub fn parse(&self, text: &str) -> Result<String, ShortcodeError> {
        self.parse_with_context(text, &())
    }

    /// Parse and render `text`, passing `context` to every handler.
    ///
    /// # Errors
    /// Returns the first [`ShortcodeError`] encountered: nesting and
    /// unrecognised-tag errors while building, rendering errors while
    /// invoking handlers. Nothing is rendered on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortcodes::Parser;
    ///
    /// struct Site {
    ///     name: &'static str,
    /// }
    ///
    /// let mut parser = Parser::new();
    /// parser.register("site", None, |ctx, _, _, _| {
    ///     let site = ctx.downcast_ref::<Site>().ok_or("missing site context")?;
    ///     Ok(site.name.to_owned())
    /// });
    /// let out = parser.parse_with_context("© [% site %]", &Site { name: "Example" });
    /// assert_eq!(out.unwrap(), "© Example");
    /// ```
    pub fn parse_with_context<C: Any>(&self, text: &str, context: &C) -> Result<String, ShortcodeError> {
        let document = self.build(text)?;
        log::trace!(
            "rendering {} top-level nodes from {} bytes of input",
            document.children().len(),
            text.len()
        );
        document.render(context)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
