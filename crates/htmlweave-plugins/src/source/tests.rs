//! Unit tests for the attribute source plugin and its URL helpers.

use rstest::{fixture, rstest};

use super::*;
use crate::protocol::ReplacementValue;
use crate::resolve::{PassthroughResolver, ResolveError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run(plugin: &SourcePlugin<'_>, markup: &str) -> (String, Vec<Message>) {
    let mut document = DocumentContext::new(markup);
    plugin.process(&mut document).expect("process");
    document.into_parts()
}

fn import_urls(messages: &[Message]) -> Vec<&str> {
    messages
        .iter()
        .filter_map(|message| match message {
            Message::Import(import) => Some(import.url()),
            _ => None,
        })
        .collect()
}

fn replacements(messages: &[Message]) -> Vec<&Replacement> {
    messages
        .iter()
        .filter_map(|message| match message {
            Message::Replacement(replacement) => Some(replacement),
            _ => None,
        })
        .collect()
}

fn errors(messages: &[Message]) -> Vec<&TransformError> {
    messages
        .iter()
        .filter_map(|message| match message {
            Message::Error(error) => Some(error),
            _ => None,
        })
        .collect()
}

fn reject_missing(request: &str) -> Result<String, ResolveError> {
    if request.contains("missing") {
        Err(ResolveError::not_found(request))
    } else {
        Ok(request.to_owned())
    }
}

#[fixture]
fn plugin() -> SourcePlugin<'static> {
    SourcePlugin::new(AttributeSelection::Defaults, &PassthroughResolver)
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[rstest]
fn single_image_becomes_one_import_and_replacement(plugin: SourcePlugin<'static>) {
    let (markup, messages) = run(&plugin, "<img src=\"logo.png\">");

    assert_eq!(markup, "<img src=\"___HTML_LOADER_REPLACEMENT_0___\">");
    assert_eq!(
        messages,
        vec![
            Message::Import(Import::new("___HTML_LOADER_IMPORT_0___", "./logo.png")),
            Message::Replacement(Replacement::import(
                "___HTML_LOADER_REPLACEMENT_0___",
                "___HTML_LOADER_IMPORT_0___",
            )),
        ]
    );
}

#[rstest]
fn imports_follow_document_order(plugin: SourcePlugin<'static>) {
    let (markup, messages) = run(
        &plugin,
        "<script src=\"app.js\"></script><video poster=\"p.jpg\" src=\"v.mp4\"></video>",
    );

    assert_eq!(import_urls(&messages), vec!["./app.js", "./p.jpg", "./v.mp4"]);
    for replacement in replacements(&messages) {
        assert!(markup.contains(replacement.id()), "{markup}");
    }
}

#[rstest]
fn repeated_urls_get_separate_placeholders(plugin: SourcePlugin<'static>) {
    let (markup, messages) = run(&plugin, "<img src=\"a.png\"><img src=\"a.png\">");

    assert_eq!(import_urls(&messages), vec!["./a.png", "./a.png"]);
    assert!(markup.contains("___HTML_LOADER_REPLACEMENT_0___"));
    assert!(markup.contains("___HTML_LOADER_REPLACEMENT_1___"));
}

#[rstest]
fn srcset_candidates_are_imported_individually(plugin: SourcePlugin<'static>) {
    let (markup, messages) = run(&plugin, "<img srcset=\"a.png 1x, b.png 2x\">");

    assert_eq!(
        markup,
        "<img srcset=\"___HTML_LOADER_REPLACEMENT_0___ 1x, ___HTML_LOADER_REPLACEMENT_1___ 2x\">"
    );
    assert_eq!(import_urls(&messages), vec!["./a.png", "./b.png"]);
}

#[rstest]
fn unquoted_values_request_quoting(plugin: SourcePlugin<'static>) {
    let (markup, messages) = run(&plugin, "<img src=logo.png>");

    assert_eq!(markup, "<img src=___HTML_LOADER_REPLACEMENT_0___>");
    let replacement = replacements(&messages)
        .first()
        .copied()
        .expect("replacement");
    assert!(replacement.options().needs_quotes);
}

#[rstest]
fn fragments_move_into_replacement_options(plugin: SourcePlugin<'static>) {
    let (_, messages) = run(&plugin, "<svg><use href=\"icons.svg#home\"/></svg>");

    assert_eq!(import_urls(&messages), vec!["./icons.svg"]);
    let replacement = replacements(&messages)
        .first()
        .copied()
        .expect("replacement");
    assert_eq!(replacement.options().hash.as_deref(), Some("#home"));
    assert_eq!(
        replacement.value(),
        &ReplacementValue::Import("___HTML_LOADER_IMPORT_0___".into())
    );
}

#[rstest]
#[case::loader_chain("<img src=\"file-loader!logo.png\">", "file-loader!./logo.png")]
#[case::module("<img src=\"~pkg/logo.png\">", "pkg/logo.png")]
#[case::parent("<img src=\"../logo.png\">", "../logo.png")]
#[case::entities("<img src=\"a&amp;b.png\">", "./a&b.png")]
#[case::percent("<img src=\"my%20logo.png\">", "./my logo.png")]
#[case::reserved_escape("<img src=\"a%23b.png\">", "./a%23b.png")]
#[case::padded("<img src=\"  logo.png \">", "./logo.png")]
#[case::windows("<img src=\"C:\\img\\a.png\">", "C:\\img\\a.png")]
#[case::upper_case("<IMG SRC=\"logo.png\">", "./logo.png")]
fn requests_are_made_explicit(
    plugin: SourcePlugin<'static>,
    #[case] markup: &str,
    #[case] expected: &str,
) {
    let (_, messages) = run(&plugin, markup);
    assert_eq!(import_urls(&messages), vec![expected]);
}

#[test]
fn padded_values_splice_only_the_url() {
    let plugin = SourcePlugin::new(AttributeSelection::Defaults, &PassthroughResolver);
    let (markup, _) = run(&plugin, "<img src=\" a.png \">");
    assert_eq!(markup, "<img src=\" ___HTML_LOADER_REPLACEMENT_0___ \">");
}

#[rstest]
fn links_are_filtered_by_rel(plugin: SourcePlugin<'static>) {
    let (_, messages) = run(
        &plugin,
        concat!(
            "<link rel=\"stylesheet\" href=\"a.css\">",
            "<link rel=\"canonical\" href=\"b.html\">",
            "<link rel=\"shortcut icon\" href=\"c.ico\">",
            "<link href=\"d.css\">",
        ),
    );
    assert_eq!(import_urls(&messages), vec!["./a.css", "./c.ico"]);
}

#[test]
fn root_relative_urls_use_configured_root() {
    let plugin = SourcePlugin::new(AttributeSelection::Defaults, &PassthroughResolver)
        .with_root(Some("./static/".into()));
    let (_, messages) = run(&plugin, "<img src=\"/logo.png\">");
    assert_eq!(import_urls(&messages), vec!["./static/logo.png"]);
}

#[test]
fn predicate_selection_picks_custom_attributes() {
    let selection = AttributeSelection::predicate(|candidate| candidate.attribute == "data-src");
    let plugin = SourcePlugin::new(selection, &PassthroughResolver);
    let (_, messages) = run(&plugin, "<img src=\"a.png\" data-src=\"b.png\">");
    assert_eq!(import_urls(&messages), vec!["./b.png"]);
}

#[test]
fn list_selection_replaces_defaults() {
    let selection =
        AttributeSelection::List(vec![AttributeSpec::new("*", "data-bg", SourceKind::Src)]);
    let plugin = SourcePlugin::new(selection, &PassthroughResolver);
    let (_, messages) = run(&plugin, "<div data-bg=\"bg.png\"><img src=\"a.png\"></div>");
    assert_eq!(import_urls(&messages), vec!["./bg.png"]);
}

#[test]
fn default_selection_matches_the_default_table() {
    let markup = concat!(
        "<img src=\"a.png\" srcset=\"b.png 2x\">",
        "<video poster=\"c.jpg\"><source src=\"d.mp4\"></video>",
        "<svg><use href=\"e.svg#i\"/></svg>",
        "<div data-bg=\"f.png\"></div>",
    );
    let defaults = SourcePlugin::new(AttributeSelection::Defaults, &PassthroughResolver);
    let table = SourcePlugin::new(
        AttributeSelection::List(default_attributes()),
        &PassthroughResolver,
    );

    let (_, from_defaults) = run(&defaults, markup);
    let (_, from_table) = run(&table, markup);
    assert_eq!(
        import_urls(&from_defaults),
        vec!["./a.png", "./b.png", "./c.jpg", "./d.mp4", "./e.svg"]
    );
    assert_eq!(from_defaults, from_table);
}

#[rstest]
#[case::named_comma("<img src=\"a&comma;b.png\">", "./a,b.png")]
#[case::named_parens("<img src=\"&lpar;1&rpar;.png\">", "./(1).png")]
fn named_references_are_decoded_before_import(
    plugin: SourcePlugin<'static>,
    #[case] markup: &str,
    #[case] expected: &str,
) {
    let (_, messages) = run(&plugin, markup);
    assert_eq!(import_urls(&messages), vec![expected]);
}

#[test]
fn url_filter_can_veto_urls() {
    let plugin = SourcePlugin::new(AttributeSelection::Defaults, &PassthroughResolver)
        .with_resource_path("/pages/index.html")
        .with_url_filter(Some(UrlFilter::new(|_, url, path| {
            path == "/pages/index.html" && !url.ends_with(".svg")
        })));
    let (markup, messages) = run(&plugin, "<img src=\"a.svg\"><img src=\"b.png\">");
    assert_eq!(import_urls(&messages), vec!["./b.png"]);
    assert!(markup.contains("a.svg"));
}

#[test]
fn salted_prefix_is_used_when_input_contains_default() {
    let plugin = SourcePlugin::new(AttributeSelection::Defaults, &PassthroughResolver);
    let (markup, _) = run(
        &plugin,
        "<p>___HTML_LOADER_REPLACEMENT_0___</p><img src=\"a.png\">",
    );
    assert_eq!(
        markup,
        "<p>___HTML_LOADER_REPLACEMENT_0___</p><img src=\"___HTML_LOADER_REPLACEMENT_1_0___\">"
    );
}

// ---------------------------------------------------------------------------
// Skipped values
// ---------------------------------------------------------------------------

#[rstest]
#[case::empty("<img src=\"\">")]
#[case::blank("<img src=\"   \">")]
#[case::no_value("<img src>")]
#[case::data_uri("<img src=\"data:image/png;base64,AAAA\">")]
#[case::absolute("<img src=\"https://cdn.example.com/a.png\">")]
#[case::absolute_with_bang("<img src=\"https://cdn.example.com/a!b.png\">")]
#[case::data_uri_with_bang("<img src=\"data:text/plain,hi!x.png\">")]
#[case::chained_absolute("<img src=\"raw!https://cdn.example.com/a.png\">")]
#[case::protocol_relative("<img src=\"//cdn.example.com/a.png\">")]
#[case::anchor("<use href=\"#icon\"/>")]
#[case::template("<img src=\"{{ logo }}\">")]
#[case::root_without_root("<img src=\"/logo.png\">")]
#[case::unlisted_tag("<div src=\"a.png\"></div>")]
#[case::comment("<!-- <img src=\"a.png\"> -->")]
fn non_requestable_values_are_left_alone(plugin: SourcePlugin<'static>, #[case] markup: &str) {
    let (output, messages) = run(&plugin, markup);
    assert_eq!(output, markup);
    assert!(messages.is_empty(), "{messages:?}");
}

#[test]
fn disabled_selection_does_nothing() {
    let plugin = SourcePlugin::new(AttributeSelection::Disabled, &PassthroughResolver);
    let (output, messages) = run(&plugin, "<img src=\"a.png\">");
    assert_eq!(output, "<img src=\"a.png\">");
    assert!(messages.is_empty());
}

// ---------------------------------------------------------------------------
// Error reporting
// ---------------------------------------------------------------------------

#[test]
fn unresolved_reference_does_not_stop_the_others() {
    let resolver = reject_missing;
    let plugin = SourcePlugin::new(AttributeSelection::Defaults, &resolver);
    let (markup, messages) = run(
        &plugin,
        "<img src=\"a.png\">\n<img src=\"missing.png\">\n<img src=\"c.png\">",
    );

    assert_eq!(import_urls(&messages), vec!["./a.png", "./c.png"]);
    assert_eq!(replacements(&messages).len(), 2);
    let errors = errors(&messages);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors.first(),
        Some(TransformError::Unresolved { line: 2, .. })
    ));
    assert!(markup.contains("missing.png"));
}

#[rstest]
fn malformed_escape_is_reported(plugin: SourcePlugin<'static>) {
    let (markup, messages) = run(&plugin, "<img src=\"a%zz.png\"><img src=\"b.png\">");

    assert_eq!(import_urls(&messages), vec!["./b.png"]);
    assert!(matches!(
        errors(&messages).first(),
        Some(TransformError::InvalidUrl { attribute, .. }) if attribute == "src"
    ));
    assert!(markup.contains("a%zz.png"));
}

#[rstest]
fn invalid_srcset_is_reported(plugin: SourcePlugin<'static>) {
    let (_, messages) = run(&plugin, "<img srcset=\"a.png 1q\">");
    assert!(matches!(
        errors(&messages).first(),
        Some(TransformError::InvalidSrcset { .. })
    ));
}

// ---------------------------------------------------------------------------
// URL helpers
// ---------------------------------------------------------------------------

#[rstest]
#[case("logo.png", false, true)]
#[case("./logo.png", false, true)]
#[case("~pkg/a.css", false, true)]
#[case("C:\\a.png", false, true)]
#[case("/logo.png", false, false)]
#[case("/logo.png", true, true)]
#[case("mailto:someone@example.com", false, false)]
#[case("javascript:void(0)", false, false)]
#[case("?query", false, false)]
#[case("${url}", false, false)]
#[case("<%= url %>", false, false)]
fn requestability(#[case] value: &str, #[case] has_root: bool, #[case] expected: bool) {
    assert_eq!(is_url_requestable(value, has_root), expected);
}

#[rstest]
#[case("a\tb\n.png", "ab.png")]
#[case("dir\\a.png", "dir/a.png")]
#[case("caf%C3%A9.png", "café.png")]
#[case("a%2Fb.png", "a%2Fb.png")]
fn normalisation(#[case] value: &str, #[case] expected: &str) {
    assert_eq!(normalize_url(value).expect("normalize"), expected);
}

#[rstest]
#[case("a%.png", UrlError::MalformedEscape { position: 1 })]
#[case("a%FF.png", UrlError::InvalidUtf8)]
fn normalisation_failures(#[case] value: &str, #[case] expected: UrlError) {
    assert_eq!(normalize_url(value), Err(expected));
}

#[test]
fn hash_split_keeps_hash_sign() {
    assert_eq!(split_hash("a.svg#x"), ("a.svg", Some("#x")));
    assert_eq!(split_hash("a.svg"), ("a.svg", None));
}

#[test]
fn loader_prefix_split_uses_last_bang() {
    assert_eq!(split_loader_prefix("a!b!c.css"), (Some("a!b"), "c.css"));
    assert_eq!(split_loader_prefix("c.css"), (None, "c.css"));
}

#[rstest]
#[case("a.png", None, "./a.png")]
#[case("/a.png", Some("/srv/"), "/srv/a.png")]
#[case("file:///a.png", None, "file:///a.png")]
fn requestify_shapes_requests(
    #[case] url: &str,
    #[case] root: Option<&str>,
    #[case] expected: &str,
) {
    assert_eq!(requestify(url, root), expected);
}
