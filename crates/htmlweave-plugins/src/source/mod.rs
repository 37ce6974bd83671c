//! Plugin that turns resource references in attributes into imports.
//!
//! [`SourcePlugin`] scans every start tag, picks the attributes named by its
//! [`AttributeSelection`], and for each requestable URL emits an
//! [`Import`], a [`Replacement`] and a splice of the URL's byte range to a
//! fresh placeholder. All splices are applied in one forward pass at the end.

mod url;

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use htmlweave_syntax::{
    AttributeValue, Parser, SourceLocation, Splice, Splicer, StartTag, decode_entities,
    parse_srcset,
};
use tracing::{debug, trace};

pub use self::url::{
    UrlError, is_url_requestable, is_windows_drive_path, normalize_url, requestify, split_hash,
    split_loader_prefix,
};
use crate::context::DocumentContext;
use crate::error::PluginError;
use crate::protocol::{Import, Message, Replacement, ReplacementOptions, TransformError};
use crate::resolve::RequestResolver;
use crate::runner::Plugin;

const PLUGIN_NAME: &str = "source";

/// `rel` values for which `<link href>` is imported by default.
pub const LINK_RELS: &[&str] = &[
    "stylesheet",
    "icon",
    "shortcut icon",
    "mask-icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
    "apple-touch-startup-image",
    "manifest",
    "prefetch",
    "preload",
];

/// How an attribute value holds URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The whole value is one URL.
    Src,
    /// A comma-separated list of `url [descriptor]` candidates.
    Srcset,
}

/// Condition on the surrounding tag that an [`AttributeSpec`] must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeFilter {
    /// Another attribute of the tag holds one of `tokens`, either as its
    /// whole value or as one whitespace-separated token.
    AnyToken {
        /// Attribute inspected on the same tag.
        attribute: String,
        /// Accepted tokens, lowercase.
        tokens: Vec<String>,
    },
}

impl AttributeFilter {
    /// Filter accepting links whose `rel` is one of [`LINK_RELS`].
    #[must_use]
    pub fn link_rel() -> Self {
        Self::AnyToken {
            attribute: "rel".to_owned(),
            tokens: LINK_RELS.iter().map(|&rel| rel.to_owned()).collect(),
        }
    }

    fn allows(&self, tag: &StartTag<'_>) -> bool {
        match self {
            Self::AnyToken { attribute, tokens } => {
                let Some(value) = tag.attribute(attribute).and_then(|a| a.value()) else {
                    return false;
                };
                let lowered = decode_entities(value.text()).trim().to_ascii_lowercase();
                tokens.iter().any(|token| {
                    *token == lowered || lowered.split_ascii_whitespace().any(|part| part == token)
                })
            }
        }
    }
}

/// One tag/attribute pair whose value holds URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Tag name, or `*` for any tag.
    pub tag: String,
    /// Attribute name, including any namespace prefix (`xlink:href`).
    pub attribute: String,
    /// How the value holds URLs.
    pub kind: SourceKind,
    /// Optional condition on the tag.
    pub filter: Option<AttributeFilter>,
}

impl AttributeSpec {
    /// Creates a spec without a filter.
    #[must_use]
    pub fn new(tag: impl Into<String>, attribute: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            tag: tag.into(),
            attribute: attribute.into(),
            kind,
            filter: None,
        }
    }

    /// Adds a tag filter.
    #[must_use]
    pub fn with_filter(mut self, filter: AttributeFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    fn matches(&self, tag: &StartTag<'_>, attribute: &str) -> bool {
        (self.tag == "*" || tag.is(&self.tag))
            && self.attribute.eq_ignore_ascii_case(attribute)
            && self.filter.as_ref().is_none_or(|filter| filter.allows(tag))
    }
}

/// The attributes imported when nothing else is configured.
#[must_use]
pub fn default_attributes() -> Vec<AttributeSpec> {
    use SourceKind::{Src, Srcset};

    vec![
        AttributeSpec::new("audio", "src", Src),
        AttributeSpec::new("embed", "src", Src),
        AttributeSpec::new("img", "src", Src),
        AttributeSpec::new("img", "srcset", Srcset),
        AttributeSpec::new("input", "src", Src),
        AttributeSpec::new("link", "href", Src).with_filter(AttributeFilter::link_rel()),
        AttributeSpec::new("object", "data", Src),
        AttributeSpec::new("script", "src", Src),
        AttributeSpec::new("source", "src", Src),
        AttributeSpec::new("source", "srcset", Srcset),
        AttributeSpec::new("track", "src", Src),
        AttributeSpec::new("video", "poster", Src),
        AttributeSpec::new("video", "src", Src),
        AttributeSpec::new("image", "xlink:href", Src),
        AttributeSpec::new("image", "href", Src),
        AttributeSpec::new("use", "xlink:href", Src),
        AttributeSpec::new("use", "href", Src),
    ]
}

/// An attribute offered to an [`AttributeSelection::Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeCandidate<'a> {
    /// Tag name as written.
    pub tag: &'a str,
    /// Attribute name as written.
    pub attribute: &'a str,
    /// Raw attribute value.
    pub value: &'a str,
}

/// Predicate deciding whether an attribute holds URLs.
pub type AttributePredicate = Arc<dyn Fn(&AttributeCandidate<'_>) -> bool + Send + Sync>;

/// Which attributes the plugin inspects.
#[derive(Clone, Default)]
pub enum AttributeSelection {
    /// Inspect nothing.
    Disabled,
    /// Inspect [`default_attributes`].
    #[default]
    Defaults,
    /// Inspect exactly these attributes.
    List(Vec<AttributeSpec>),
    /// Inspect every attribute the predicate accepts; `srcset` attributes are
    /// read as candidate lists.
    Predicate(AttributePredicate),
}

impl AttributeSelection {
    /// Wraps a closure as a predicate selection.
    #[must_use]
    pub fn predicate(
        predicate: impl Fn(&AttributeCandidate<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    /// Returns `true` unless the selection is [`AttributeSelection::Disabled`].
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    fn resolved(self) -> Self {
        match self {
            Self::Defaults => Self::List(default_attributes()),
            other => other,
        }
    }

    fn kind_for(
        &self,
        tag: &StartTag<'_>,
        attribute: &str,
        value: &AttributeValue<'_>,
    ) -> Option<SourceKind> {
        match self {
            // `Defaults` is resolved to `List` on construction.
            Self::Disabled | Self::Defaults => None,
            Self::List(specs) => specs
                .iter()
                .find(|spec| spec.matches(tag, attribute))
                .map(|spec| spec.kind),
            Self::Predicate(predicate) => {
                let candidate = AttributeCandidate {
                    tag: tag.name(),
                    attribute,
                    value: value.text(),
                };
                predicate(&candidate).then(|| {
                    if attribute.eq_ignore_ascii_case("srcset") {
                        SourceKind::Srcset
                    } else {
                        SourceKind::Src
                    }
                })
            }
        }
    }
}

impl fmt::Debug for AttributeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Defaults => f.write_str("Defaults"),
            Self::List(specs) => f.debug_tuple("List").field(specs).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Extra veto over requestable URLs: `(attribute, url, resource_path)`.
#[derive(Clone)]
pub struct UrlFilter(Arc<dyn Fn(&str, &str, &str) -> bool + Send + Sync>);

impl UrlFilter {
    /// Wraps a filter closure.
    #[must_use]
    pub fn new(filter: impl Fn(&str, &str, &str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(filter))
    }

    /// Reports whether `url` found in `attribute` of `resource_path` should be
    /// imported.
    #[must_use]
    pub fn allows(&self, attribute: &str, url: &str, resource_path: &str) -> bool {
        (self.0)(attribute, url, resource_path)
    }
}

impl fmt::Debug for UrlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UrlFilter(..)")
    }
}

/// A URL occurrence inside an attribute value.
struct Occurrence<'t> {
    tag: &'t str,
    attribute: &'t str,
    raw: &'t str,
    range: Range<usize>,
    location: SourceLocation,
    quoted: bool,
}

/// Rewrites resource URLs in attributes into placeholders and reports them as
/// imports.
pub struct SourcePlugin<'r> {
    selection: AttributeSelection,
    resolver: &'r dyn RequestResolver,
    root: Option<String>,
    url_filter: Option<UrlFilter>,
    resource_path: String,
}

impl<'r> SourcePlugin<'r> {
    /// Creates a plugin inspecting `selection` and resolving through
    /// `resolver`.
    #[must_use]
    pub fn new(selection: AttributeSelection, resolver: &'r dyn RequestResolver) -> Self {
        Self {
            selection: selection.resolved(),
            resolver,
            root: None,
            url_filter: None,
            resource_path: String::new(),
        }
    }

    /// Makes root-relative URLs requestable, prefixed with `root`.
    #[must_use]
    pub fn with_root(mut self, root: Option<String>) -> Self {
        self.root = root;
        self
    }

    /// Installs an extra URL veto.
    #[must_use]
    pub fn with_url_filter(mut self, filter: Option<UrlFilter>) -> Self {
        self.url_filter = filter;
        self
    }

    /// Sets the path of the document, passed to the URL filter.
    #[must_use]
    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    fn occurrences<'t>(
        &self,
        tag: &StartTag<'t>,
        attribute: &'t str,
        value: &AttributeValue<'t>,
        document: &mut DocumentContext,
    ) -> Vec<Occurrence<'t>> {
        let Some(kind) = self.selection.kind_for(tag, attribute, value) else {
            return Vec::new();
        };
        let base = value.byte_range().start;
        let text = value.text();
        match kind {
            SourceKind::Src => {
                let lead = text.len() - text.trim_start().len();
                let raw = text.trim();
                vec![Occurrence {
                    tag: tag.name(),
                    attribute,
                    raw,
                    range: base + lead..base + lead + raw.len(),
                    location: value.location().advanced_by(lead),
                    quoted: value.is_quoted(),
                }]
            }
            SourceKind::Srcset => match parse_srcset(text) {
                Ok(candidates) => candidates
                    .iter()
                    .map(|candidate| {
                        let range = candidate.url_range();
                        Occurrence {
                            tag: tag.name(),
                            attribute,
                            raw: text.get(range.clone()).unwrap_or_default(),
                            range: base + range.start..base + range.end,
                            location: value.location().advanced_by(range.start),
                            quoted: value.is_quoted(),
                        }
                    })
                    .collect(),
                Err(error) => {
                    let location = value.location();
                    document.push_message(Message::Error(TransformError::InvalidSrcset {
                        tag: tag.name().to_owned(),
                        attribute: attribute.to_owned(),
                        reason: error.to_string(),
                        line: location.line,
                        column: location.column,
                    }));
                    Vec::new()
                }
            },
        }
    }

    /// Handles one URL occurrence, returning the splice to record when it is
    /// imported.
    fn import_occurrence(
        &self,
        occurrence: &Occurrence<'_>,
        document: &mut DocumentContext,
    ) -> Option<Splice> {
        let decoded = decode_entities(occurrence.raw);
        let value = decoded.trim();
        if document.placeholders().is_issued(value) {
            return None;
        }
        let has_root = self.root.is_some();
        let (prefix, resource) = split_loader_prefix(value);
        if !is_url_requestable(value, has_root) || !is_url_requestable(resource, has_root) {
            trace!(
                target: "htmlweave::source",
                attribute = occurrence.attribute,
                value,
                "skipping non-requestable value"
            );
            return None;
        }

        let location = occurrence.location;
        let normalized = match normalize_url(resource) {
            Ok(normalized) => normalized,
            Err(error) => {
                document.push_message(Message::Error(TransformError::InvalidUrl {
                    tag: occurrence.tag.to_owned(),
                    attribute: occurrence.attribute.to_owned(),
                    value: value.to_owned(),
                    reason: error.to_string(),
                    line: location.line,
                    column: location.column,
                }));
                return None;
            }
        };

        if let Some(filter) = &self.url_filter
            && !filter.allows(occurrence.attribute, &normalized, &self.resource_path)
        {
            trace!(target: "htmlweave::source", url = %normalized, "url filter declined");
            return None;
        }

        let (path, hash) = split_hash(&normalized);
        let explicit = requestify(path, self.root.as_deref());
        let request = match prefix {
            Some(chain) => format!("{chain}!{explicit}"),
            None => explicit,
        };

        let resolved = match self.resolver.resolve(&request) {
            Ok(resolved) => resolved,
            Err(error) => {
                document.push_message(Message::Error(TransformError::Unresolved {
                    request,
                    reason: error.to_string(),
                    line: location.line,
                    column: location.column,
                }));
                return None;
            }
        };

        let placeholders = document.placeholders_mut();
        let import_name = placeholders.next_import_name();
        let id = placeholders.next_placeholder();
        trace!(
            target: "htmlweave::source",
            request = %request,
            placeholder = %id,
            "importing attribute url"
        );
        let options = ReplacementOptions {
            hash: hash.map(str::to_owned),
            needs_quotes: !occurrence.quoted,
        };
        document.push_message(Message::Import(Import::new(import_name.clone(), resolved)));
        document.push_message(Message::Replacement(
            Replacement::import(id.clone(), import_name).with_options(options),
        ));
        Some(Splice::new(occurrence.range.clone(), id))
    }
}

impl Plugin for SourcePlugin<'_> {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn process(&self, document: &mut DocumentContext) -> Result<(), PluginError> {
        if !self.selection.is_enabled() {
            return Ok(());
        }
        let mut parser = Parser::new().map_err(|e| PluginError::syntax(PLUGIN_NAME, e))?;
        let parsed = parser
            .parse(document.markup())
            .map_err(|e| PluginError::syntax(PLUGIN_NAME, e))?;

        let mut splicer = Splicer::new();
        for tag in parsed.start_tags() {
            for attribute in tag.attributes() {
                let Some(value) = attribute.value() else {
                    continue;
                };
                if value.is_blank() {
                    continue;
                }
                for occurrence in self.occurrences(&tag, attribute.name(), value, document) {
                    if let Some(splice) = self.import_occurrence(&occurrence, document) {
                        splicer.push(splice);
                    }
                }
            }
        }

        debug!(
            target: "htmlweave::source",
            rewritten = splicer.len(),
            resource = %self.resource_path,
            "attribute scan complete"
        );
        if splicer.is_empty() {
            return Ok(());
        }
        let rewritten = splicer
            .apply(parsed.source())
            .map_err(|e| PluginError::rewrite(PLUGIN_NAME, e))?;
        document.set_markup(rewritten);
        Ok(())
    }
}

impl fmt::Debug for SourcePlugin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourcePlugin")
            .field("selection", &self.selection)
            .field("root", &self.root)
            .field("url_filter", &self.url_filter)
            .field("resource_path", &self.resource_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
