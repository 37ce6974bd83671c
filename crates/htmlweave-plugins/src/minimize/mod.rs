//! Plugin that minifies the rewritten markup.
//!
//! The [`MinimizerPlugin`] must run after the source plugin so the minifier
//! only ever sees placeholders, never the original URLs. Minification
//! problems are reported as messages and leave the markup untouched.

use std::string::FromUtf8Error;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::context::DocumentContext;
use crate::error::PluginError;
use crate::protocol::{Message, TransformError};
use crate::runner::Plugin;

const PLUGIN_NAME: &str = "minimizer";

/// Options forwarded to the [`Minifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimizeOptions {
    /// Keep HTML comments.
    pub keep_comments: bool,
    /// Keep optional closing tags such as `</p>` and `</li>`.
    pub keep_closing_tags: bool,
    /// Minify inline `<style>` contents and `style` attributes.
    pub minify_css: bool,
    /// Minify inline `<script>` contents.
    pub minify_js: bool,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            keep_comments: false,
            keep_closing_tags: true,
            minify_css: true,
            minify_js: true,
        }
    }
}

/// Failure raised by a [`Minifier`].
#[derive(Debug, Error)]
pub enum MinifyError {
    /// The minifier produced bytes that are not UTF-8.
    #[error("minified output is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// The minifier rejected the markup.
    #[error("{message}")]
    Failed {
        /// Failure detail.
        message: String,
    },
}

impl MinifyError {
    /// Creates a generic failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Markup minification function.
pub trait Minifier: Send + Sync {
    /// Minifies `markup`.
    ///
    /// # Errors
    ///
    /// Returns a [`MinifyError`] when the markup cannot be minified.
    fn minify(&self, markup: &str, options: &MinimizeOptions) -> Result<String, MinifyError>;
}

/// [`Minifier`] backed by the `minify-html` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlMinifier;

impl Minifier for HtmlMinifier {
    fn minify(&self, markup: &str, options: &MinimizeOptions) -> Result<String, MinifyError> {
        let cfg = minify_html::Cfg {
            keep_comments: options.keep_comments,
            keep_closing_tags: options.keep_closing_tags,
            keep_html_and_head_opening_tags: true,
            minify_css: options.minify_css,
            minify_js: options.minify_js,
            ..minify_html::Cfg::default()
        };
        let minified = minify_html::minify(markup.as_bytes(), &cfg);
        Ok(String::from_utf8(minified)?)
    }
}

/// Replaces the markup with its minified form.
#[derive(Clone)]
pub struct MinimizerPlugin {
    minifier: Arc<dyn Minifier>,
    options: MinimizeOptions,
}

impl MinimizerPlugin {
    /// Creates a plugin using `minifier` with `options`.
    #[must_use]
    pub fn new(minifier: Arc<dyn Minifier>, options: MinimizeOptions) -> Self {
        Self { minifier, options }
    }

    /// Creates a plugin using [`HtmlMinifier`].
    #[must_use]
    pub fn html(options: MinimizeOptions) -> Self {
        Self::new(Arc::new(HtmlMinifier), options)
    }

    /// Returns the options passed to the minifier.
    #[must_use]
    pub const fn options(&self) -> &MinimizeOptions {
        &self.options
    }
}

impl std::fmt::Debug for MinimizerPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinimizerPlugin")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Plugin for MinimizerPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn process(&self, document: &mut DocumentContext) -> Result<(), PluginError> {
        let before = document.markup();
        let present: Vec<String> = document
            .placeholders()
            .issued()
            .iter()
            .filter(|token| before.contains(token.as_str()))
            .cloned()
            .collect();

        let minified = match self.minifier.minify(before, &self.options) {
            Ok(minified) => minified,
            Err(error) => {
                warn!(target: "htmlweave::minimize", %error, "minification failed");
                document.push_message(Message::Error(TransformError::Minify {
                    message: error.to_string(),
                }));
                return Ok(());
            }
        };

        if let Some(lost) = present.iter().find(|token| {
            before.matches(token.as_str()).count() != minified.matches(token.as_str()).count()
        }) {
            warn!(
                target: "htmlweave::minimize",
                placeholder = %lost,
                "minifier altered a placeholder"
            );
            document.push_message(Message::Error(TransformError::PlaceholderLost {
                placeholder: lost.clone(),
            }));
            return Ok(());
        }

        flag_unquoted(document, &present, &minified);
        debug!(
            target: "htmlweave::minimize",
            before = document.markup().len(),
            after = minified.len(),
            "markup minified"
        );
        document.set_markup(minified);
        Ok(())
    }
}

/// Marks replacements whose placeholder the minifier left as a bare
/// attribute value.
fn flag_unquoted(document: &mut DocumentContext, present: &[String], minified: &str) {
    let unquoted: Vec<&String> = present
        .iter()
        .filter(|token| {
            minified
                .match_indices(token.as_str())
                .any(|(index, _)| {
                    minified
                        .get(..index)
                        .is_some_and(|before| before.ends_with('='))
                })
        })
        .collect();
    if unquoted.is_empty() {
        return;
    }
    for message in document.messages_mut() {
        if let Message::Replacement(replacement) = message
            && unquoted.iter().any(|token| token.as_str() == replacement.id())
        {
            replacement.options_mut().needs_quotes = true;
        }
    }
}
