//! Process-wide shortcode registrations.
//!
//! Handlers submitted with the [`shortcode!`](crate::shortcode) macro are
//! collected at link time and assembled into a single [`Registry`] the first
//! time any parser needs it. The registry never changes afterwards.

use std::sync::{Arc, LazyLock};

use hashbrown::HashMap;

use super::Registry;
use crate::handler::HandlerFn;

/// A shortcode handler registered for every parser in the process.
#[derive(Debug)]
pub struct GlobalShortcode {
    /// Tag naming the shortcode.
    pub tag: &'static str,
    /// Tag closing the block, or `None` for an atomic shortcode.
    pub end_tag: Option<&'static str>,
    /// Function rendering the shortcode.
    pub handler: HandlerFn,
    /// Source file where the shortcode is registered.
    pub file: &'static str,
    /// Line number within the source file.
    pub line: u32,
}

/// Register a shortcode handler with the process-wide registry.
///
/// The two-argument form registers an atomic shortcode; the three-argument
/// form adds the end-tag closing a block shortcode. The handler must be a
/// function with the [`HandlerFn`](crate::HandlerFn) signature.
///
/// # Examples
///
/// ```
/// use std::any::Any;
/// use shortcodes::{HandlerResult, KeywordArgs, Parser, shortcode};
///
/// fn year(_: &dyn Any, _: Option<&str>, _: &[String], _: &KeywordArgs) -> HandlerResult {
///     Ok("2024".to_owned())
/// }
///
/// fn quote(_: &dyn Any, content: Option<&str>, _: &[String], _: &KeywordArgs) -> HandlerResult {
///     Ok(format!("“{}”", content.unwrap_or_default()))
/// }
///
/// shortcode!("year", year);
/// shortcode!("quote", "endquote", quote);
///
/// let out = Parser::new().parse("[% quote %]since [% year %][% endquote %]").unwrap();
/// assert_eq!(out, "“since 2024”");
/// ```
#[macro_export]
macro_rules! shortcode {
    (@submit $tag:expr, $end_tag:expr, $handler:path) => {
        const _: () = {
            $crate::submit! {
                $crate::GlobalShortcode {
                    tag: $tag,
                    end_tag: $end_tag,
                    handler: $handler,
                    file: file!(),
                    line: line!(),
                }
            }
        };
    };

    ($tag:expr, $handler:path $(,)?) => {
        $crate::shortcode!(@submit $tag, ::core::option::Option::None, $handler);
    };

    ($tag:expr, $end_tag:expr, $handler:path $(,)?) => {
        $crate::shortcode!(
            @submit $tag,
            ::core::option::Option::Some($end_tag),
            $handler
        );
    };
}

inventory::collect!(GlobalShortcode);

static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut seen: HashMap<&'static str, &'static GlobalShortcode> = HashMap::new();
    let mut registry = Registry::new();
    for entry in inventory::iter::<GlobalShortcode> {
        if let Some(previous) = seen.insert(entry.tag, entry) {
            panic!(
                "duplicate global shortcode '{}' registered at {}:{} and {}:{}",
                entry.tag, previous.file, previous.line, entry.file, entry.line
            );
        }
        registry.register_handler(entry.tag, entry.end_tag, Arc::new(entry.handler));
    }
    registry
});

/// The process-wide registry built from [`shortcode!`](crate::shortcode)
/// submissions.
///
/// # Panics
/// Panics on first use if two submissions share a tag; the message names
/// both source locations.
#[must_use]
pub fn global_registry() -> &'static Registry {
    &GLOBAL_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeywordArgs;
    use crate::handler::HandlerResult;
    use std::any::Any;

    fn unit_test_handler(
        _: &dyn Any,
        content: Option<&str>,
        _: &[String],
        _: &KeywordArgs,
    ) -> HandlerResult {
        Ok(format!("[{}]", content.unwrap_or("unit")))
    }

    crate::shortcode!("unit-test-atomic", unit_test_handler);
    crate::shortcode!("unit-test-block", "unit-test-end", unit_test_handler);

    #[test]
    fn collects_submitted_shortcodes() {
        let found = inventory::iter::<GlobalShortcode>
            .into_iter()
            .any(|entry| entry.tag == "unit-test-atomic" && entry.file.ends_with("global.rs"));
        assert!(found, "registered shortcode was not found in the inventory");
    }

    #[test]
    fn global_registry_exposes_submissions() {
        let registry = global_registry();
        assert!(registry.get("unit-test-atomic").is_some_and(|r| !r.is_block()));
        assert_eq!(
            registry.get("unit-test-block").and_then(|r| r.end_tag()),
            Some("unit-test-end")
        );
        assert!(registry.is_end_tag("unit-test-end"));
    }
}
