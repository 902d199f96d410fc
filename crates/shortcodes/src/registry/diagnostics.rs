//! Diagnostics-only registry exports.
//!
//! Serialises the shortcodes visible to a parser so external tooling can
//! list which tags are available and where global ones were registered.

use serde::Serialize;

use super::GlobalShortcode;
use crate::parser::Parser;

#[derive(Serialize)]
struct DumpedShortcode<'a> {
    tag: &'a str,
    end_tag: Option<&'a str>,
    scope: &'static str,
    file: Option<&'static str>,
    line: Option<u32>,
    shadowed: bool,
}

#[derive(Serialize)]
struct RegistryDump<'a> {
    shortcodes: Vec<DumpedShortcode<'a>>,
}

/// Serialise the shortcodes visible to `parser` as JSON.
///
/// The document has a single `shortcodes` array, sorted by tag, in which
/// every entry records the tag, its end-tag, whether it comes from the
/// `instance` or `global` scope, the source location of global entries, and
/// whether a global entry is shadowed by an instance registration.
///
/// # Errors
///
/// Returns an error if serialisation fails.
///
/// # Examples
///
/// ```
/// use shortcodes::{Parser, dump_registry};
///
/// let mut parser = Parser::new();
/// parser.register("local", None, |_, _, _, _| Ok(String::new()));
/// let json = dump_registry(&parser).expect("serialise registry");
/// assert!(json.contains("\"tag\":\"local\""));
/// ```
pub fn dump_registry(parser: &Parser) -> serde_json::Result<String> {
    let local = parser.registry();
    let mut shortcodes: Vec<_> = local
        .iter()
        .map(|(tag, reg)| DumpedShortcode {
            tag,
            end_tag: reg.end_tag(),
            scope: "instance",
            file: None,
            line: None,
            shadowed: false,
        })
        .collect();

    if parser.config().global_handlers {
        shortcodes.extend(inventory::iter::<GlobalShortcode>.into_iter().map(|entry| {
            DumpedShortcode {
                tag: entry.tag,
                end_tag: entry.end_tag,
                scope: "global",
                file: Some(entry.file),
                line: Some(entry.line),
                shadowed: local.get(entry.tag).is_some(),
            }
        }));
    }

    shortcodes.sort_by(|a, b| a.tag.cmp(b.tag).then(a.scope.cmp(b.scope)));
    serde_json::to_string(&RegistryDump { shortcodes })
}
