//! Error types for markup scanning operations.
//!
//! This module provides structured error types for all operations in the
//! `htmlweave-syntax` crate, including parsing, `srcset` decoding, and
//! splicing.

use std::ops::Range;

use thiserror::Error;

/// Errors from markup scanning operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for HTML.
    #[error("failed to initialise HTML parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// Failed to parse markup.
    #[error("failed to parse markup: {message}")]
    ParseError {
        /// Description of the failure.
        message: String,
    },

    /// A `srcset` attribute value could not be decoded.
    #[error("invalid srcset: {message}")]
    InvalidSrcset {
        /// Description of the decoding failure.
        message: String,
    },

    /// Two splices claim overlapping byte ranges.
    #[error("overlapping splices at {first:?} and {second:?}")]
    OverlappingSplice {
        /// The earlier of the two ranges.
        first: Range<usize>,
        /// The range that overlaps it.
        second: Range<usize>,
    },

    /// A splice range falls outside the source or off a UTF-8 boundary.
    #[error("splice range {range:?} is invalid for a source of {len} bytes")]
    InvalidSpliceRange {
        /// The offending range.
        range: Range<usize>,
        /// Length of the source text in bytes.
        len: usize,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates an invalid `srcset` error.
    #[must_use]
    pub fn invalid_srcset(message: impl Into<String>) -> Self {
        Self::InvalidSrcset {
            message: message.into(),
        }
    }
}
