//! Sequential plugin pipeline.
//!
//! The [`PipelineRunner`] folds a document through an ordered list of
//! [`Plugin`]s. Each plugin sees the markup left by its predecessor and
//! appends to the shared message list, so messages from plugin *i* always
//! precede those from plugin *i + 1*.

use tracing::{debug, trace};

use crate::context::DocumentContext;
use crate::error::PluginError;
use crate::protocol::Message;

/// A single transformation step over a document.
///
/// # Example
///
/// ```
/// use htmlweave_plugins::{DocumentContext, Plugin, PluginError, PipelineRunner};
///
/// struct Upper;
///
/// impl Plugin for Upper {
///     fn name(&self) -> &str {
///         "upper"
///     }
///
///     fn process(&self, document: &mut DocumentContext) -> Result<(), PluginError> {
///         let markup = document.markup().to_uppercase();
///         document.set_markup(markup);
///         Ok(())
///     }
/// }
///
/// let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(Upper)];
/// let output = PipelineRunner::new(plugins).process("<p>hi</p>")?;
/// assert_eq!(output.markup(), "<P>HI</P>");
/// # Ok::<(), PluginError>(())
/// ```
pub trait Plugin {
    /// Returns a short name used in logs and errors.
    fn name(&self) -> &str;

    /// Transforms the document in place.
    ///
    /// Problems with the content of the document are reported as
    /// [`Message::Error`] and do not fail the call.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] only when the plugin cannot finish at all.
    fn process(&self, document: &mut DocumentContext) -> Result<(), PluginError>;
}

/// Final markup and messages produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    markup: String,
    messages: Vec<Message>,
}

impl ProcessOutput {
    /// Returns the transformed markup.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Returns every message in emission order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Splits the output into markup and messages.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Message>) {
        (self.markup, self.messages)
    }
}

/// Runs plugins in order over a fresh [`DocumentContext`].
#[derive(Default)]
pub struct PipelineRunner<'a> {
    plugins: Vec<Box<dyn Plugin + 'a>>,
}

impl<'a> PipelineRunner<'a> {
    /// Creates a runner with the given plugins, in execution order.
    #[must_use]
    pub fn new(plugins: Vec<Box<dyn Plugin + 'a>>) -> Self {
        Self { plugins }
    }

    /// Appends a plugin to the end of the pipeline.
    pub fn push(&mut self, plugin: impl Plugin + 'a) {
        self.plugins.push(Box::new(plugin));
    }

    /// Returns the number of plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` when the pipeline has no plugins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Returns the plugin names in execution order.
    #[must_use]
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Runs every plugin over `markup`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PluginError`] raised by a plugin; later plugins do
    /// not run.
    pub fn process(&self, markup: impl Into<String>) -> Result<ProcessOutput, PluginError> {
        let mut document = DocumentContext::new(markup);
        for plugin in &self.plugins {
            let before = document.messages().len();
            plugin.process(&mut document)?;
            trace!(
                target: "htmlweave::pipeline",
                plugin = plugin.name(),
                emitted = document.messages().len() - before,
                "plugin finished"
            );
        }
        let (markup, messages) = document.into_parts();
        debug!(
            target: "htmlweave::pipeline",
            plugins = self.plugins.len(),
            messages = messages.len(),
            bytes = markup.len(),
            "pipeline run complete"
        );
        Ok(ProcessOutput { markup, messages })
    }
}

impl std::fmt::Debug for PipelineRunner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}
