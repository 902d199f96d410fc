//! Stack-based tree builder enforcing block balance.
//!
//! The builder consumes tokens in order. Open block shortcodes sit on a
//! stack together with the end-tag each one is waiting for; text and atomic
//! shortcodes are appended to the innermost open block, or to the root when
//! none is open. An end-tag must match the top of the stack.

use shortcodes_lexer::{ShortcodeToken, Token, parse_arguments};

use crate::error::{NestingError, ShortcodeError};
use crate::node::{Document, Node, Shortcode};
use crate::registry::Scope;

struct OpenBlock<'r, 't> {
    shortcode: Shortcode<'r, 't>,
    children: Vec<Node<'r, 't>>,
    expecting: &'r str,
}

pub(crate) struct TreeBuilder<'r, 't> {
    scope: Scope<'r>,
    ignore_unknown: bool,
    max_depth: Option<usize>,
    root: Vec<Node<'r, 't>>,
    open: Vec<OpenBlock<'r, 't>>,
}

impl<'r, 't> TreeBuilder<'r, 't> {
    pub(crate) fn new(scope: Scope<'r>, ignore_unknown: bool, max_depth: Option<usize>) -> Self {
        Self {
            scope,
            ignore_unknown,
            max_depth,
            root: Vec::new(),
            open: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Vec<Node<'r, 't>> {
        self.open
            .last_mut()
            .map_or(&mut self.root, |block| &mut block.children)
    }

    pub(crate) fn push(&mut self, token: Token<'t>) -> Result<(), ShortcodeError> {
        match token {
            Token::Text(text) => self.current().push(Node::Text(text)),
            Token::Escaped { literal, .. } => self.current().push(Node::Text(literal)),
            Token::Shortcode(token) => self.push_shortcode(token)?,
        }
        Ok(())
    }

    fn push_shortcode(&mut self, token: ShortcodeToken<'t>) -> Result<(), ShortcodeError> {
        let Some((tag, argstring)) = token.split() else {
            return Ok(());
        };

        if self.scope.is_end_tag(tag) {
            return self.close(tag);
        }

        let Some(registration) = self.scope.lookup(tag) else {
            if self.ignore_unknown {
                log::debug!("keeping unrecognised shortcode '{tag}' as text");
                self.current().push(Node::Text(token.raw()));
                return Ok(());
            }
            return Err(ShortcodeError::InvalidTag {
                tag: tag.to_owned(),
            });
        };

        let shortcode = Shortcode::new(tag, registration.handler(), parse_arguments(argstring));
        if let Some(expecting) = registration.end_tag() {
            return self
                .open_block(shortcode, expecting)
                .map_err(ShortcodeError::from);
        }
        self.current().push(Node::Atomic(shortcode));
        Ok(())
    }

    fn open_block(
        &mut self,
        shortcode: Shortcode<'r, 't>,
        expecting: &'r str,
    ) -> Result<(), NestingError> {
        if let Some(limit) = self.max_depth {
            if self.open.len() >= limit {
                return Err(NestingError::DepthExceeded { limit });
            }
        }
        self.open.push(OpenBlock {
            shortcode,
            children: Vec::new(),
            expecting,
        });
        Ok(())
    }

    fn close(&mut self, tag: &str) -> Result<(), ShortcodeError> {
        let Some(block) = self.open.pop() else {
            return Err(NestingError::Unexpected {
                found: tag.to_owned(),
            }
            .into());
        };
        if block.expecting != tag {
            return Err(NestingError::Mismatched {
                expected: block.expecting.to_owned(),
                found: tag.to_owned(),
            }
            .into());
        }
        let node = Node::Block {
            shortcode: block.shortcode,
            children: block.children,
        };
        self.current().push(node);
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Result<Document<'r, 't>, ShortcodeError> {
        if let Some(block) = self.open.pop() {
            return Err(NestingError::Unclosed {
                expected: block.expecting.to_owned(),
            }
            .into());
        }
        Ok(Document::new(self.root))
    }
}
