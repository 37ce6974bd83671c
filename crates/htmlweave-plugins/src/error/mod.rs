//! Errors that abort a plugin run.
//!
//! Problems with individual attribute values or with minification are never
//! raised here; plugins report those as
//! [`Message::Error`](crate::protocol::Message::Error) and keep going. A
//! [`PluginError`] means the pipeline itself could not continue.

use htmlweave_syntax::SyntaxError;
use thiserror::Error;

/// Errors arising while a plugin processes a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PluginError {
    /// The markup scanner could not be initialised or failed to parse.
    #[error("plugin '{plugin}' could not scan the markup: {source}")]
    Syntax {
        /// Plugin name.
        plugin: String,
        /// Underlying scanner error.
        #[source]
        source: SyntaxError,
    },

    /// The recorded rewrites could not be applied to the markup.
    #[error("plugin '{plugin}' produced conflicting rewrites: {source}")]
    Rewrite {
        /// Plugin name.
        plugin: String,
        /// Underlying splice error.
        #[source]
        source: SyntaxError,
    },
}

impl PluginError {
    /// Wraps a scanner failure raised inside `plugin`.
    #[must_use]
    pub fn syntax(plugin: impl Into<String>, source: SyntaxError) -> Self {
        Self::Syntax {
            plugin: plugin.into(),
            source,
        }
    }

    /// Wraps a splice failure raised inside `plugin`.
    #[must_use]
    pub fn rewrite(plugin: impl Into<String>, source: SyntaxError) -> Self {
        Self::Rewrite {
            plugin: plugin.into(),
            source,
        }
    }

    /// Returns the name of the plugin that failed.
    #[must_use]
    pub fn plugin(&self) -> &str {
        match self {
            Self::Syntax { plugin, .. } | Self::Rewrite { plugin, .. } => plugin,
        }
    }
}
