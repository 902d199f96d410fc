//! The document tree produced by the tree builder.
//!
//! Text nodes borrow from the input and shortcode nodes borrow their handler
//! from the registry, so a [`Document`] lives no longer than either.

use std::fmt;

use shortcodes_lexer::{Arguments, KeywordArgs};

use crate::handler::Handler;

/// A parsed shortcode invocation: its tag, handler and arguments.
pub struct Shortcode<'r, 't> {
    tag: &'t str,
    handler: &'r dyn Handler,
    arguments: Arguments,
}

impl<'r, 't> Shortcode<'r, 't> {
    pub(crate) fn new(tag: &'t str, handler: &'r dyn Handler, arguments: Arguments) -> Self {
        Self {
            tag,
            handler,
            arguments,
        }
    }

    /// The tag naming the shortcode.
    #[must_use]
    pub fn tag(&self) -> &'t str {
        self.tag
    }

    /// Positional arguments in source order.
    #[must_use]
    pub fn positional(&self) -> &[String] {
        &self.arguments.positional
    }

    /// Keyword arguments.
    #[must_use]
    pub fn keyword(&self) -> &KeywordArgs {
        &self.arguments.keyword
    }

    pub(crate) fn handler(&self) -> &'r dyn Handler {
        self.handler
    }
}

impl fmt::Debug for Shortcode<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcode")
            .field("tag", &self.tag)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// A node below the document root.
#[derive(Debug)]
pub enum Node<'r, 't> {
    /// Literal text, including unwrapped escaped shortcodes.
    Text(&'t str),
    /// A shortcode without an end-tag.
    Atomic(Shortcode<'r, 't>),
    /// A shortcode enclosing child nodes up to its end-tag.
    Block {
        /// The opening shortcode.
        shortcode: Shortcode<'r, 't>,
        /// Nodes between the opening shortcode and its end-tag.
        children: Vec<Node<'r, 't>>,
    },
}

impl<'r, 't> Node<'r, 't> {
    /// The shortcode carried by this node, if any.
    #[must_use]
    pub fn shortcode(&self) -> Option<&Shortcode<'r, 't>> {
        match self {
            Self::Text(_) => None,
            Self::Atomic(shortcode) | Self::Block { shortcode, .. } => Some(shortcode),
        }
    }

    /// Child nodes; empty for everything except blocks.
    #[must_use]
    pub fn children(&self) -> &[Node<'r, 't>] {
        match self {
            Self::Block { children, .. } => children,
            Self::Text(_) | Self::Atomic(_) => &[],
        }
    }
}

// Deeply nested blocks would otherwise be dropped recursively and could
// exhaust the stack.
impl Drop for Node<'_, '_> {
    fn drop(&mut self) {
        let Self::Block { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Self::Block { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

/// The root of a parsed input.
///
/// Built by [`Parser::build`](crate::Parser::build) and rendered with
/// [`Document::render`]. A document is immutable once built.
#[derive(Debug)]
pub struct Document<'r, 't> {
    children: Vec<Node<'r, 't>>,
}

impl<'r, 't> Document<'r, 't> {
    pub(crate) fn new(children: Vec<Node<'r, 't>>) -> Self {
        Self { children }
    }

    /// Top-level nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[Node<'r, 't>] {
        &self.children
    }
}
