//! Crate-level pipeline tests.

use std::collections::HashSet;
use std::sync::Arc;

use rstest::rstest;

use crate::minimize::{Minifier, MinifyError, MinimizeOptions, MinimizerPlugin};
use crate::protocol::{Message, partition_messages};
use crate::resolve::PassthroughResolver;
use crate::runner::{PipelineRunner, Plugin};
use crate::source::{AttributeSelection, SourcePlugin};

struct WhitespaceStripper;

impl Minifier for WhitespaceStripper {
    fn minify(&self, markup: &str, _options: &MinimizeOptions) -> Result<String, MinifyError> {
        Ok(markup.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

fn pipeline(minify: bool) -> PipelineRunner<'static> {
    let mut plugins: Vec<Box<dyn Plugin>> = vec![Box::new(SourcePlugin::new(
        AttributeSelection::Defaults,
        &PassthroughResolver,
    ))];
    if minify {
        plugins.push(Box::new(MinimizerPlugin::new(
            Arc::new(WhitespaceStripper),
            MinimizeOptions::default(),
        )));
    }
    PipelineRunner::new(plugins)
}

const GALLERY: &str = concat!(
    "<link rel=\"stylesheet\" href=\"site.css\">\n",
    "<picture>\n",
    "  <source srcset=\"a.webp 1x, a@2x.webp 2x\">\n",
    "  <img src=\"a.png\" alt=\"a\">\n",
    "</picture>\n",
    "<img src=\"a.png\">\n",
    "<script src=\"app.js\"></script>\n",
);

#[rstest]
#[case(false)]
#[case(true)]
fn every_replacement_has_exactly_one_token(#[case] minify: bool) {
    let (markup, messages) = pipeline(minify)
        .process(GALLERY)
        .expect("process")
        .into_parts();
    let partitioned = partition_messages(messages);

    assert_eq!(partitioned.replacements.len(), 6);
    let mut seen = HashSet::new();
    for replacement in &partitioned.replacements {
        assert!(seen.insert(replacement.id()), "duplicate id");
        assert_eq!(markup.matches(replacement.id()).count(), 1, "{markup}");
    }
    for (a, b) in seen.iter().flat_map(|a| seen.iter().map(move |b| (a, b))) {
        if a != b {
            assert!(!b.contains(a), "{a} inside {b}");
        }
    }
}

#[test]
fn import_order_matches_document_order() {
    let output = pipeline(false).process(GALLERY).expect("process");
    let urls: Vec<&str> = output
        .messages()
        .iter()
        .filter_map(|message| match message {
            Message::Import(import) => Some(import.url()),
            _ => None,
        })
        .collect();
    assert_eq!(
        urls,
        vec![
            "./site.css",
            "./a.webp",
            "./a@2x.webp",
            "./a.png",
            "./a.png",
            "./app.js"
        ]
    );
}

#[test]
fn whitespace_stripping_minifier_keeps_placeholders() {
    let output = pipeline(true)
        .process("<div>\n    <img src=\"a.png\">\n</div>")
        .expect("process");
    assert_eq!(
        output.markup(),
        "<div> <img src=\"___HTML_LOADER_REPLACEMENT_0___\"> </div>"
    );
    assert!(
        output
            .messages()
            .iter()
            .all(|message| !matches!(message, Message::Error(_)))
    );
}

#[test]
fn substituting_urls_back_restores_the_input() {
    let (markup, messages) = pipeline(false)
        .process(GALLERY)
        .expect("process")
        .into_parts();
    let partitioned = partition_messages(messages);

    let mut restored = markup;
    for (replacement, import) in partitioned.replacements.iter().zip(&partitioned.imports) {
        let original = import.url().trim_start_matches("./");
        restored = restored.replace(replacement.id(), original);
    }
    assert_eq!(restored, GALLERY);
}
