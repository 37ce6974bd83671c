//! Shared position conversion helpers.
//!
//! Tree-sitter positions are zero-based. For user-facing messages, we prefer
//! one-based line and column numbers.

use std::fmt;

/// One-based line and column of a point in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    /// Line number (one-based).
    pub line: u32,
    /// Column number in bytes (one-based).
    pub column: u32,
}

impl SourceLocation {
    /// Creates a location from one-based coordinates.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the location `offset` bytes further along the same line.
    #[must_use]
    pub fn advanced_by(self, offset: usize) -> Self {
        let delta = u32::try_from(offset).unwrap_or(u32::MAX);
        Self {
            line: self.line,
            column: self.column.saturating_add(delta),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_location(pos: tree_sitter::Point) -> SourceLocation {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    SourceLocation { line, column }
}
