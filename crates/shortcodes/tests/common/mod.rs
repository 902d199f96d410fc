//! Shared parser fixture for integration tests.

use shortcodes::{Parser, ParserConfig};

/// A parser with the handlers used throughout the integration tests.
///
/// `ignore_unknown` is pinned to `false` so results do not depend on the
/// process-wide default.
pub fn parser() -> Parser {
    let config = ParserConfig::default().with_ignore_unknown(false);
    let mut parser =
        Parser::with_config(config).unwrap_or_else(|err| panic!("default config: {err}"));
    parser
        .register("foo", None, |_, _, _, _| Ok("bar".to_owned()))
        .register("wrap", Some("endwrap"), |_, content, args, _| {
            let tag = args.first().map_or("span", String::as_str);
            Ok(format!("<{tag}>{}</{tag}>", content.unwrap_or_default()))
        })
        .register("args", None, |_, _, positional, keyword| {
            let mut parts: Vec<String> = positional.to_vec();
            parts.extend(keyword.iter().map(|(key, value)| format!("{key}:{value}")));
            Ok(parts.join("|"))
        });
    parser
}
