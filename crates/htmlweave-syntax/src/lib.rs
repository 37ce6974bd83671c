//! Tree-sitter powered markup scanning for the htmlweave toolchain.
//!
//! This crate provides the text-level building blocks the transform plugins
//! rely on:
//!
//! - **Start tag scanning** via [`Parser`] and [`ParseResult::start_tags`],
//!   which report every tag and attribute value with its exact byte range
//!   without building a DOM
//! - **`srcset` decoding** via [`parse_srcset`]
//! - **Character reference decoding** via [`decode_entities`]
//! - **Offset-safe rewriting** via [`Splicer`], which applies many
//!   replacements recorded against the original text in one forward pass
//!
//! # Example
//!
//! ```
//! use htmlweave_syntax::{Parser, Splice, Splicer};
//!
//! let source = "<img src=\"logo.png\">";
//! let mut parser = Parser::new()?;
//! let parsed = parser.parse(source)?;
//!
//! let mut splicer = Splicer::new();
//! for tag in parsed.start_tags() {
//!     if let Some(value) = tag.attribute("src").and_then(|a| a.value()) {
//!         splicer.push(Splice::new(value.byte_range(), "ID"));
//!     }
//! }
//! assert_eq!(splicer.apply(source)?, "<img src=\"ID\">");
//! # Ok::<(), htmlweave_syntax::SyntaxError>(())
//! ```

mod entities;
mod error;
mod parser;
mod position;
mod splice;
mod srcset;
mod tag;

pub use entities::decode_entities;
pub use error::SyntaxError;
pub use parser::{ParseResult, Parser};
pub use position::SourceLocation;
pub use splice::{Splice, Splicer};
pub use srcset::{SrcsetCandidate, parse_srcset};
pub use tag::{Attribute, AttributeValue, StartTag};

#[cfg(test)]
mod tests;
