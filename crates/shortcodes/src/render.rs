//! Bottom-up rendering of a parsed [`Document`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::slice;

use crate::error::{HandlerPanic, ShortcodeError};
use crate::handler::HandlerResult;
use crate::node::{Document, Node, Shortcode};
use crate::panic::panic_message;

impl Document<'_, '_> {
    /// Render the document, passing `context` to every handler.
    ///
    /// Children are rendered before the block that encloses them, so each
    /// block handler receives its content fully rendered. Rendering keeps
    /// its own stack of open blocks, so nesting depth is bounded by memory
    /// rather than by the thread's stack.
    ///
    /// A panicking handler is reported as a [`HandlerPanic`]. The panic
    /// still passes through the process panic hook first, so the default
    /// hook prints its usual message to stderr; install a custom hook with
    /// [`std::panic::set_hook`] to silence it.
    ///
    /// # Errors
    /// Returns [`ShortcodeError::Rendering`] for the first handler that
    /// fails or panics.
    pub fn render(&self, context: &dyn Any) -> Result<String, ShortcodeError> {
        let mut parents: Vec<Frame<'_, '_, '_>> = Vec::new();
        let mut current = Frame::new(None, self.children());
        loop {
            match current.nodes.next() {
                Some(Node::Text(text)) => current.out.push_str(text),
                Some(Node::Atomic(shortcode)) => {
                    current.out.push_str(&invoke(shortcode, context, None)?);
                }
                Some(Node::Block {
                    shortcode,
                    children,
                }) => {
                    let child = Frame::new(Some(shortcode), children);
                    parents.push(std::mem::replace(&mut current, child));
                }
                None => {
                    let Some(shortcode) = current.shortcode else {
                        return Ok(current.out);
                    };
                    let rendered = invoke(shortcode, context, Some(&current.out))?;
                    let Some(parent) = parents.pop() else {
                        return Ok(rendered);
                    };
                    current = parent;
                    current.out.push_str(&rendered);
                }
            }
        }
    }
}

// A block whose children are being rendered; the root has no shortcode.
struct Frame<'n, 'r, 't> {
    shortcode: Option<&'n Shortcode<'r, 't>>,
    nodes: slice::Iter<'n, Node<'r, 't>>,
    out: String,
}

impl<'n, 'r, 't> Frame<'n, 'r, 't> {
    fn new(shortcode: Option<&'n Shortcode<'r, 't>>, nodes: &'n [Node<'r, 't>]) -> Self {
        Self {
            shortcode,
            nodes: nodes.iter(),
            out: String::new(),
        }
    }
}

fn invoke(
    shortcode: &Shortcode<'_, '_>,
    context: &dyn Any,
    content: Option<&str>,
) -> Result<String, ShortcodeError> {
    let handler = shortcode.handler();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        handler.invoke(context, content, shortcode.positional(), shortcode.keyword())
    }));
    let result: HandlerResult = outcome.unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        log::warn!(
            "handler for shortcode '{}' panicked: {message}",
            shortcode.tag()
        );
        Err(HandlerPanic { message }.into())
    });
    result.map_err(|source| ShortcodeError::Rendering {
        tag: shortcode.tag().to_owned(),
        source,
    })
}
