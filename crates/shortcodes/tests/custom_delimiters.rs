//! Behavioural tests for non-default shortcode markers.

use rstest::rstest;
use shortcodes::{Parser, ParserConfig};

fn parser(start: &str, end: &str, esc: &str) -> Parser {
    let config = ParserConfig::default()
        .with_delimiters(start, end)
        .with_escape(esc)
        .with_ignore_unknown(false);
    let mut parser =
        Parser::with_config(config).unwrap_or_else(|err| panic!("valid config: {err}"));
    parser
        .register("foo", None, |_, _, _, _| Ok("bar".to_owned()))
        .register("b", Some("/b"), |_, content, _, _| {
            Ok(format!("<b>{}</b>", content.unwrap_or_default()))
        });
    parser
}

#[rstest]
#[case("{{", "}}", "!", "x {{ foo }} y", "x bar y")]
#[case("{{", "}}", "!", "!{{ foo }}", "{{ foo }}")]
#[case("{{", "}}", "!", "{{ b }}{{ foo }}{{ /b }}", "<b>bar</b>")]
#[case("<<", ">>", "\\", "[% foo %] <<foo>>", "[% foo %] bar")]
#[case("(*", "*)", "$", "(* b *)$(* foo *)(* /b *)", "<b>(* foo *)</b>")]
#[case("++", "--", "^^", "^^++foo-- ++foo--", "++foo-- bar")]
fn markers_are_matched_literally(
    #[case] start: &str,
    #[case] end: &str,
    #[case] esc: &str,
    #[case] text: &str,
    #[case] expected: &str,
) {
    let out = parser(start, end, esc)
        .parse(text)
        .unwrap_or_else(|err| panic!("'{text}' should render: {err}"));
    assert_eq!(out, expected);
}

#[test]
fn identical_markers_are_rejected() {
    let config = ParserConfig::default().with_delimiters("%%", "%%");
    assert!(Parser::with_config(config).is_err_and(|err| err.to_string().contains("%%")));
}
