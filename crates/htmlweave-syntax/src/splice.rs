//! Offset-safe text splicing.
//!
//! Splices are recorded against byte ranges of the original text and applied
//! in a single forward copy pass. Because the output is rebuilt from the
//! original instead of being edited in place, the length of one replacement
//! never shifts the offsets of the next.

use std::ops::Range;

use crate::error::SyntaxError;

/// A replacement of one byte range of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    range: Range<usize>,
    replacement: String,
}

impl Splice {
    /// Creates a splice replacing `range` with `replacement`.
    #[must_use]
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Returns the replaced range of the original text.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Collects splices and applies them to the text they were recorded against.
#[derive(Debug, Clone, Default)]
pub struct Splicer {
    splices: Vec<Splice>,
}

impl Splicer {
    /// Creates an empty splicer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            splices: Vec::new(),
        }
    }

    /// Records a splice.
    pub fn push(&mut self, splice: Splice) {
        self.splices.push(splice);
    }

    /// Returns the number of recorded splices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.splices.len()
    }

    /// Returns whether no splice was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.splices.is_empty()
    }

    /// Applies every recorded splice to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidSpliceRange`] when a range lies outside
    /// `source` or off a UTF-8 boundary, and
    /// [`SyntaxError::OverlappingSplice`] when two ranges overlap.
    pub fn apply(mut self, source: &str) -> Result<String, SyntaxError> {
        self.splices.sort_by_key(|splice| splice.range.start);

        let extra: usize = self.splices.iter().map(|s| s.replacement.len()).sum();
        let mut out = String::with_capacity(source.len().saturating_add(extra));
        let mut cursor = 0_usize;
        let mut previous: Option<Range<usize>> = None;

        for splice in &self.splices {
            let range = splice.range();
            if range.start > range.end
                || range.end > source.len()
                || !source.is_char_boundary(range.start)
                || !source.is_char_boundary(range.end)
            {
                return Err(SyntaxError::InvalidSpliceRange {
                    range,
                    len: source.len(),
                });
            }
            if let Some(prev) = previous.filter(|prev| range.start < prev.end) {
                return Err(SyntaxError::OverlappingSplice {
                    first: prev,
                    second: range,
                });
            }

            out.push_str(source.get(cursor..range.start).unwrap_or_default());
            out.push_str(&splice.replacement);
            cursor = range.end;
            previous = Some(range);
        }

        out.push_str(source.get(cursor..).unwrap_or_default());
        Ok(out)
    }
}
