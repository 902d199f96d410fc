//! Behavioural tests for passing caller context to handlers.

use std::cell::Cell;

use shortcodes::{Parser, ParserConfig};

struct Page {
    title: &'static str,
    visits: Cell<u32>,
}

fn parser() -> Parser {
    let config = ParserConfig::default().with_ignore_unknown(false);
    let mut parser =
        Parser::with_config(config).unwrap_or_else(|err| panic!("valid config: {err}"));
    parser
        .register("title", None, |ctx, _, _, _| {
            let page = ctx.downcast_ref::<Page>().ok_or("expected a page context")?;
            Ok(page.title.to_owned())
        })
        .register("count", None, |ctx, _, _, _| {
            let page = ctx.downcast_ref::<Page>().ok_or("expected a page context")?;
            page.visits.set(page.visits.get() + 1);
            Ok(page.visits.get().to_string())
        });
    parser
}

#[test]
fn handlers_see_the_caller_context() {
    let page = Page {
        title: "Home",
        visits: Cell::new(0),
    };
    let out = parser()
        .parse_with_context("[% title %]: [% count %], [% count %]", &page)
        .unwrap_or_else(|err| panic!("should render: {err}"));
    assert_eq!(out, "Home: 1, 2");
    assert_eq!(page.visits.get(), 2);
}

#[test]
fn wrong_context_type_is_a_rendering_error() {
    let Err(err) = parser().parse("[% title %]") else {
        panic!("unit context should be rejected by the handler");
    };
    assert_eq!(err.tag(), Some("title"));
    let cause = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(cause.as_deref(), Some("expected a page context"));
}
