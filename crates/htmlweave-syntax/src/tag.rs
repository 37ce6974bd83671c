//! Start tags and their attributes, borrowed from the parsed markup.

use std::ops::Range;

use crate::position::{SourceLocation, point_to_location};

/// A start tag (or self-closing tag) found in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    name: &'a str,
    byte_range: Range<usize>,
    attributes: Vec<Attribute<'a>>,
}

impl<'a> StartTag<'a> {
    pub(crate) fn from_node(node: tree_sitter::Node<'_>, source: &'a str) -> Option<Self> {
        let mut name = None;
        let mut attributes = Vec::new();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "tag_name" => name = source.get(child.byte_range()),
                "attribute" => {
                    if let Some(attribute) = Attribute::from_node(child, source) {
                        attributes.push(attribute);
                    }
                }
                _ => {}
            }
        }

        Some(Self {
            name: name?,
            byte_range: node.byte_range(),
            attributes,
        })
    }

    /// Returns the tag name as written in the markup.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Returns whether the tag name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the byte range of the whole tag.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_range.clone()
    }

    /// Returns the attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute<'a>] {
        &self.attributes
    }

    /// Returns the first attribute named `name`, ignoring ASCII case.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute<'a>> {
        self.attributes.iter().find(|attribute| attribute.is(name))
    }
}

/// A single attribute of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    name: &'a str,
    value: Option<AttributeValue<'a>>,
}

impl<'a> Attribute<'a> {
    fn from_node(node: tree_sitter::Node<'_>, source: &'a str) -> Option<Self> {
        let mut name = None;
        let mut value = None;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "attribute_name" => name = source.get(child.byte_range()),
                "attribute_value" => value = AttributeValue::unquoted(child, source),
                "quoted_attribute_value" => value = AttributeValue::quoted(child, source),
                _ => {}
            }
        }

        Some(Self { name: name?, value })
    }

    /// Returns the attribute name as written in the markup.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Returns whether the attribute name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the attribute value, or `None` for a bare attribute such as
    /// `<input disabled>`.
    #[must_use]
    pub const fn value(&self) -> Option<&AttributeValue<'a>> {
        self.value.as_ref()
    }
}

/// The value of an attribute, excluding any surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue<'a> {
    text: &'a str,
    byte_range: Range<usize>,
    quoted: bool,
    location: SourceLocation,
}

impl<'a> AttributeValue<'a> {
    fn unquoted(node: tree_sitter::Node<'_>, source: &'a str) -> Option<Self> {
        Some(Self {
            text: source.get(node.byte_range())?,
            byte_range: node.byte_range(),
            quoted: false,
            location: point_to_location(node.start_position()),
        })
    }

    fn quoted(node: tree_sitter::Node<'_>, source: &'a str) -> Option<Self> {
        let mut cursor = node.walk();
        let inner = node
            .children(&mut cursor)
            .find(|child| child.kind() == "attribute_value");

        if let Some(inner) = inner {
            return Some(Self {
                text: source.get(inner.byte_range())?,
                byte_range: inner.byte_range(),
                quoted: true,
                location: point_to_location(inner.start_position()),
            });
        }

        // Empty value: the range sits between the two quote characters.
        let outer = node.byte_range();
        let start = outer.start.saturating_add(1);
        let end = outer.end.saturating_sub(1).max(start);
        Some(Self {
            text: source.get(start..end)?,
            byte_range: start..end,
            quoted: true,
            location: point_to_location(node.start_position()).advanced_by(1),
        })
    }

    /// Returns the raw value text (entities not decoded).
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Returns the byte range of the value text within the markup.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_range.clone()
    }

    /// Returns whether the value was written between quotes.
    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Returns the location of the first character of the value.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        self.location
    }

    /// Returns whether the value is empty or consists only of whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
