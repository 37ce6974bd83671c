//! Message types exchanged between transform plugins and the loader driver.
//!
//! Plugins never return values to one another. Everything a plugin wants the
//! driver to know (an import to declare, a placeholder to substitute, a
//! problem to report) is pushed as a [`Message`] onto the document context.
//! Messages serialise as `{"type": ..., "value": ...}` records so a host can
//! log or forward them unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A record emitted by a plugin while processing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Message {
    /// A reportable failure that did not stop processing.
    Error(TransformError),
    /// A module-level import to declare.
    Import(Import),
    /// A placeholder to substitute when the module is evaluated.
    Replacement(Replacement),
}

/// Request to bind a module-level import to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    import_name: String,
    url: String,
    #[serde(default)]
    options: ImportOptions,
}

impl Import {
    /// Creates an import binding `import_name` to `url`.
    #[must_use]
    pub fn new(import_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            import_name: import_name.into(),
            url: url.into(),
            options: ImportOptions::default(),
        }
    }

    /// Replaces the import options.
    #[must_use]
    pub const fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the generated binding name.
    #[must_use]
    pub const fn import_name(&self) -> &str {
        self.import_name.as_str()
    }

    /// Returns the resolved request.
    #[must_use]
    pub const fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the per-import options.
    #[must_use]
    pub const fn options(&self) -> &ImportOptions {
        &self.options
    }
}

/// Per-import options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// How the imported module's value is used.
    pub kind: ImportKind,
}

/// How the value of an imported module is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// The module resolves to a resource URL.
    #[default]
    Url,
    /// The module exports text that is inserted verbatim.
    RawText,
}

/// Request to substitute a placeholder in the output markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    id: String,
    value: ReplacementValue,
    #[serde(default)]
    options: ReplacementOptions,
}

impl Replacement {
    /// Creates a replacement of placeholder `id` by the value bound to
    /// `import_name`.
    #[must_use]
    pub fn import(id: impl Into<String>, import_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: ReplacementValue::Import(import_name.into()),
            options: ReplacementOptions::default(),
        }
    }

    /// Creates a replacement of placeholder `id` by an inline expression.
    #[must_use]
    pub fn expression(id: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: ReplacementValue::Expression(expression.into()),
            options: ReplacementOptions::default(),
        }
    }

    /// Replaces the replacement options.
    #[must_use]
    pub fn with_options(mut self, options: ReplacementOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the placeholder id.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns what the placeholder is substituted with.
    #[must_use]
    pub const fn value(&self) -> &ReplacementValue {
        &self.value
    }

    /// Returns the import binding, when the value comes from an import.
    #[must_use]
    pub fn import_name(&self) -> Option<&str> {
        match &self.value {
            ReplacementValue::Import(name) => Some(name.as_str()),
            ReplacementValue::Expression(_) => None,
        }
    }

    /// Returns the replacement options.
    #[must_use]
    pub const fn options(&self) -> &ReplacementOptions {
        &self.options
    }

    /// Returns the replacement options for adjustment by later plugins.
    pub const fn options_mut(&mut self) -> &mut ReplacementOptions {
        &mut self.options
    }
}

/// What a placeholder is substituted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementValue {
    /// The value bound to the named import.
    Import(String),
    /// An inline expression in the generated module's language.
    Expression(String),
}

/// Runtime adjustments applied to an imported value before substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementOptions {
    /// URL fragment (including `#`) re-appended to the resolved URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// The original attribute value was unquoted; quote the resolved URL when
    /// it contains characters that would end an unquoted value.
    #[serde(default)]
    pub needs_quotes: bool,
}

/// A failure reported by a plugin for one occurrence or one document.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformError {
    /// An attribute value could not be read as a URL.
    #[error("bad value for attribute '{attribute}' on <{tag}> at {line}:{column}: {reason}")]
    InvalidUrl {
        /// Tag carrying the attribute.
        tag: String,
        /// Attribute name.
        attribute: String,
        /// The offending value.
        value: String,
        /// Why the value was rejected.
        reason: String,
        /// One-based line of the value.
        line: u32,
        /// One-based column of the value.
        column: u32,
    },

    /// A `srcset` value could not be decoded.
    #[error("bad value for attribute '{attribute}' on <{tag}> at {line}:{column}: {reason}")]
    InvalidSrcset {
        /// Tag carrying the attribute.
        tag: String,
        /// Attribute name.
        attribute: String,
        /// Why the value was rejected.
        reason: String,
        /// One-based line of the value.
        line: u32,
        /// One-based column of the value.
        column: u32,
    },

    /// The host could not resolve a resource request.
    #[error("can't resolve '{request}' at {line}:{column}: {reason}")]
    Unresolved {
        /// The request handed to the resolver.
        request: String,
        /// Why resolution failed.
        reason: String,
        /// One-based line of the value.
        line: u32,
        /// One-based column of the value.
        column: u32,
    },

    /// The minifier failed on the whole document.
    #[error("minification failed: {message}")]
    Minify {
        /// Failure detail from the minifier.
        message: String,
    },

    /// The minifier dropped or altered a placeholder.
    #[error("minifier altered placeholder '{placeholder}'; keeping unminified markup")]
    PlaceholderLost {
        /// The placeholder missing from the minified markup.
        placeholder: String,
    },
}

/// Messages split by kind, each list in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedMessages {
    /// Reportable failures.
    pub errors: Vec<TransformError>,
    /// Imports to declare.
    pub imports: Vec<Import>,
    /// Placeholders to substitute.
    pub replacements: Vec<Replacement>,
}

/// Splits messages by kind in a single pass, keeping relative order.
#[must_use]
pub fn partition_messages(messages: impl IntoIterator<Item = Message>) -> PartitionedMessages {
    let mut partitioned = PartitionedMessages::default();
    for message in messages {
        match message {
            Message::Error(error) => partitioned.errors.push(error),
            Message::Import(import) => partitioned.imports.push(import),
            Message::Replacement(replacement) => partitioned.replacements.push(replacement),
        }
    }
    partitioned
}
