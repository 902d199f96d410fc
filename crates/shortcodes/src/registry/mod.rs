//! Shortcode registration and lookup.
//!
//! A [`Registry`] maps tags to handlers and records which tags close block
//! shortcodes. Each [`Parser`](crate::Parser) owns one; the process-wide
//! registry is assembled from [`shortcode!`](crate::shortcode) submissions.
//! During a parse both are consulted through a [`Scope`], with the parser's
//! own entries taking precedence.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use shortcodes_lexer::KeywordArgs;

use crate::handler::{Handler, HandlerResult};

#[cfg(feature = "diagnostics")]
mod diagnostics;
mod global;

#[cfg(feature = "diagnostics")]
pub use diagnostics::dump_registry;
pub use global::{GlobalShortcode, global_registry};

/// A registered handler together with its optional end-tag.
#[derive(Clone)]
pub struct Registration {
    handler: Arc<dyn Handler>,
    end_tag: Option<String>,
}

impl Registration {
    /// The handler invoked for the tag.
    #[must_use]
    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    /// The tag closing a block shortcode, or `None` for atomic shortcodes.
    #[must_use]
    pub fn end_tag(&self) -> Option<&str> {
        self.end_tag.as_deref()
    }

    /// Returns `true` when the shortcode encloses content.
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.end_tag.is_some()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("end_tag", &self.end_tag)
            .finish_non_exhaustive()
    }
}

/// Table of shortcode handlers keyed by tag.
///
/// # Examples
///
/// ```
/// use shortcodes::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("wrap", Some("endwrap"), |_, content, _, _| {
///     Ok(content.unwrap_or_default().to_owned())
/// });
/// assert!(registry.get("wrap").is_some_and(|r| r.is_block()));
/// assert!(registry.is_end_tag("endwrap"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    tags: HashMap<String, Registration>,
    // Number of registrations using each end-tag.
    ends: HashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure or function as the handler for `tag`.
    ///
    /// Supplying `end_tag` makes the shortcode block-scoped. Registering a
    /// tag again replaces the earlier entry.
    pub fn register<F>(
        &mut self,
        tag: impl Into<String>,
        end_tag: Option<&str>,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(&dyn Any, Option<&str>, &[String], &KeywordArgs) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.register_handler(tag, end_tag, Arc::new(handler))
    }

    /// Register a shared [`Handler`] implementation for `tag`.
    pub fn register_handler(
        &mut self,
        tag: impl Into<String>,
        end_tag: Option<&str>,
        handler: Arc<dyn Handler>,
    ) -> &mut Self {
        let tag = tag.into();
        let end_tag = end_tag.map(str::to_owned);
        if let Some(end) = &end_tag {
            *self.ends.entry(end.clone()).or_insert(0) += 1;
        }
        let previous = self.tags.insert(tag.clone(), Registration { handler, end_tag });
        if let Some(previous) = previous {
            log::debug!("replacing handler registered for shortcode '{tag}'");
            if let Some(end) = previous.end_tag {
                self.release_end_tag(&end);
            }
        }
        self
    }

    fn release_end_tag(&mut self, end: &str) {
        if let Some(count) = self.ends.get_mut(end) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.ends.remove(end);
            }
        }
    }

    /// Look up the registration for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Registration> {
        self.tags.get(tag)
    }

    /// Returns `true` when `tag` closes some registered block shortcode.
    #[must_use]
    pub fn is_end_tag(&self, tag: &str) -> bool {
        self.ends.contains_key(tag)
    }

    /// Iterate over the registered tags and their registrations.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Registration)> {
        self.tags.iter().map(|(tag, reg)| (tag.as_str(), reg))
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Read-only view merging a parser's registry with the global one.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scope<'r> {
    local: &'r Registry,
    global: Option<&'r Registry>,
}

impl<'r> Scope<'r> {
    pub(crate) fn new(local: &'r Registry, global: Option<&'r Registry>) -> Self {
        Self { local, global }
    }

    /// Resolve `tag`, preferring the parser's own registration.
    pub(crate) fn lookup(&self, tag: &str) -> Option<&'r Registration> {
        self.local
            .get(tag)
            .or_else(|| self.global.and_then(|global| global.get(tag)))
    }

    /// End-tags from both registries count.
    pub(crate) fn is_end_tag(&self, tag: &str) -> bool {
        self.local.is_end_tag(tag) || self.global.is_some_and(|global| global.is_end_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(
        value: &'static str,
    ) -> impl Fn(&dyn Any, Option<&str>, &[String], &KeywordArgs) -> HandlerResult
    + Send
    + Sync
    + 'static {
        move |_, _, _, _| Ok(value.to_owned())
    }

    fn render(reg: &Registration) -> String {
        reg.handler()
            .invoke(&(), None, &[], &KeywordArgs::new())
            .unwrap_or_else(|err| panic!("handler failed: {err}"))
    }

    #[test]
    fn re_registering_replaces_the_entry() {
        let mut registry = Registry::new();
        registry
            .register("tag", None, constant("first"))
            .register("tag", None, constant("second"));
        assert_eq!(registry.len(), 1);
        let Some(reg) = registry.get("tag") else {
            panic!("tag should be registered");
        };
        assert_eq!(render(reg), "second");
    }

    #[test]
    fn replaced_end_tags_are_released() {
        let mut registry = Registry::new();
        registry.register("wrap", Some("endwrap"), constant("x"));
        assert!(registry.is_end_tag("endwrap"));
        registry.register("wrap", None, constant("x"));
        assert!(!registry.is_end_tag("endwrap"));
    }

    #[test]
    fn shared_end_tags_survive_partial_replacement() {
        let mut registry = Registry::new();
        registry
            .register("a", Some("end"), constant("a"))
            .register("b", Some("end"), constant("b"))
            .register("a", None, constant("a"));
        assert!(registry.is_end_tag("end"));
    }

    #[test]
    fn scope_prefers_local_entries_and_unions_end_tags() {
        let mut local = Registry::new();
        local.register("shared", None, constant("local"));
        let mut global = Registry::new();
        global
            .register("shared", None, constant("global"))
            .register("box", Some("endbox"), constant("box"));

        let scope = Scope::new(&local, Some(&global));
        let Some(reg) = scope.lookup("shared") else {
            panic!("shared tag should resolve");
        };
        assert_eq!(render(reg), "local");
        assert!(scope.lookup("box").is_some());
        assert!(scope.is_end_tag("endbox"));

        let isolated = Scope::new(&local, None);
        assert!(isolated.lookup("box").is_none());
        assert!(!isolated.is_end_tag("endbox"));
    }
}
