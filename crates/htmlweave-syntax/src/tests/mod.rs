//! Unit tests for htmlweave-syntax.

use rstest::rstest;

use crate::{Parser, Splice, Splicer, parse_srcset};

// =============================================================================
// Parser Tests
// =============================================================================

#[rstest]
#[case::unclosed_element("<div><img src=\"a.png\">", "img")]
#[case::stray_end_tag("</span><img src=\"a.png\">", "img")]
#[case::unterminated_comment("<img src=\"a.png\"><!-- open", "img")]
fn recovered_markup_still_reports_tags(#[case] source: &str, #[case] expected: &str) {
    let mut parser = Parser::new().expect("parser init");
    let result = parser.parse(source).expect("parse");
    let tags = result.start_tags();
    assert!(tags.iter().any(|t| t.is(expected)), "{source}");
}

#[test]
fn attribute_locations_are_one_based() {
    let mut parser = Parser::new().expect("parser init");
    let result = parser.parse("<p>\n  <img src=\"a.png\">\n</p>").expect("parse");
    let tags = result.start_tags();
    let img = tags.iter().find(|t| t.is("img")).expect("img");
    let value = img.attribute("src").and_then(|a| a.value()).expect("src");

    assert_eq!(value.location().line, 2);
    assert_eq!(value.location().column, 13);
}

#[test]
fn svg_self_closing_tags_expose_namespaced_attributes() {
    let mut parser = Parser::new().expect("parser init");
    let result = parser
        .parse("<svg><use xlink:href=\"icons.svg#home\"/></svg>")
        .expect("parse");
    let tags = result.start_tags();
    let use_tag = tags.iter().find(|t| t.is("use")).expect("use");
    let value = use_tag
        .attribute("xlink:href")
        .and_then(|a| a.value())
        .expect("href");

    assert_eq!(value.text(), "icons.svg#home");
}

// =============================================================================
// Splicing Tests
// =============================================================================

#[test]
fn srcset_candidates_splice_in_place() {
    let source = "<img srcset=\"a.png 1x, b.png 2x\">";
    let mut parser = Parser::new().expect("parser init");
    let parsed = parser.parse(source).expect("parse");
    let tags = parsed.start_tags();
    let value = tags
        .first()
        .and_then(|t| t.attribute("srcset"))
        .and_then(|a| a.value())
        .expect("srcset");

    let mut splicer = Splicer::new();
    let base = value.byte_range().start;
    for (index, candidate) in parse_srcset(value.text())
        .expect("candidates")
        .iter()
        .enumerate()
    {
        let range = candidate.url_range();
        splicer.push(Splice::new(
            base + range.start..base + range.end,
            format!("U{index}"),
        ));
    }

    let output = splicer.apply(source).expect("apply");
    assert_eq!(output, "<img srcset=\"U0 1x, U1 2x\">");
}
