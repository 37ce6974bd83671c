//! Run-scoped allocation of placeholder tokens and import binding names.
//!
//! A placeholder is `<prefix><n>___`. The prefix defaults to
//! [`DEFAULT_PLACEHOLDER_PREFIX`]; when the input markup already contains it,
//! a salt segment `<k>_` is appended until the prefix no longer occurs in the
//! input. Counters are decimal without leading zeros and are always followed
//! by the `___` delimiter, so no token is a substring of another and no token
//! overlaps literal input text.

/// Prefix used for placeholder tokens unless the input already contains it.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "___HTML_LOADER_REPLACEMENT_";

/// Prefix used for generated import binding names.
pub const IMPORT_PREFIX: &str = "___HTML_LOADER_IMPORT_";

const DELIMITER: &str = "___";

/// Issues unique placeholder tokens and import names for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderAllocator {
    prefix: String,
    next_placeholder: usize,
    next_import: usize,
    issued: Vec<String>,
}

impl PlaceholderAllocator {
    /// Creates an allocator whose tokens cannot collide with `markup`.
    #[must_use]
    pub fn for_markup(markup: &str) -> Self {
        Self::with_prefix(DEFAULT_PLACEHOLDER_PREFIX, markup)
    }

    /// Creates an allocator based on `base`, salting it while `markup`
    /// contains the candidate prefix.
    #[must_use]
    pub fn with_prefix(base: &str, markup: &str) -> Self {
        let mut prefix = base.to_owned();
        let mut salt = 1_usize;
        while markup.contains(prefix.as_str()) {
            prefix = format!("{base}{salt}_");
            salt += 1;
        }
        Self {
            prefix,
            next_placeholder: 0,
            next_import: 0,
            issued: Vec::new(),
        }
    }

    /// Returns the effective placeholder prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Issues the next placeholder token.
    pub fn next_placeholder(&mut self) -> String {
        let token = format!("{}{}{DELIMITER}", self.prefix, self.next_placeholder);
        self.next_placeholder += 1;
        self.issued.push(token.clone());
        token
    }

    /// Issues the next import binding name.
    pub fn next_import_name(&mut self) -> String {
        let name = format!("{IMPORT_PREFIX}{}{DELIMITER}", self.next_import);
        self.next_import += 1;
        name
    }

    /// Returns every placeholder issued so far, in issue order.
    #[must_use]
    pub fn issued(&self) -> &[String] {
        &self.issued
    }

    /// Reports whether `value` is a placeholder issued by this allocator.
    #[must_use]
    pub fn is_issued(&self, value: &str) -> bool {
        value.starts_with(self.prefix.as_str()) && self.issued.iter().any(|token| token == value)
    }
}
