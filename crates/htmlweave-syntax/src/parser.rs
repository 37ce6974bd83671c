//! Tree-sitter parsing wrapper with error recovery.
//!
//! This module provides a high-level interface for parsing markup using the
//! Tree-sitter HTML grammar. It wraps the raw Tree-sitter parser and exposes
//! the start tags of a document with exact byte offsets, without building a
//! DOM.

use crate::error::SyntaxError;
use crate::tag::StartTag;

/// Result of parsing markup.
///
/// Contains the parsed syntax tree along with the source it was produced
/// from. Tree-sitter is error-tolerant: start tags inside recovered regions
/// are still reported.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Returns the markup that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns every start tag (including self-closing tags) in document
    /// order.
    #[must_use]
    pub fn start_tags(&self) -> Vec<StartTag<'_>> {
        let mut tags = Vec::new();
        let mut cursor = self.tree.walk();

        loop {
            let node = cursor.node();
            if matches!(node.kind(), "start_tag" | "self_closing_tag") {
                if let Some(tag) = StartTag::from_node(node, &self.source) {
                    tags.push(tag);
                }
            }

            if cursor.goto_first_child() {
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return tags;
                }
            }
        }
    }
}

/// Tree-sitter parser wrapper for HTML.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a new HTML parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser cannot be initialised
    /// with the HTML grammar.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_html::LANGUAGE.into())
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Parses markup and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree. This
    /// is rare and typically indicates a parser configuration issue.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("parsing failed"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}
