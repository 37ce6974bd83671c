//! The loader driver.
//!
//! [`Loader::load`] awaits the optional preprocessor, builds the plugin list
//! from [`LoaderOptions`], runs the pipeline, reports every transform error
//! through the [`LoaderContext`] and assembles the generated module.

mod context;
mod options;
mod preprocess;

use std::sync::Arc;

use htmlweave_plugins::{
    HtmlMinifier, Minifier, MinimizerPlugin, PipelineRunner, PluginError, ProcessOutput,
    SourcePlugin, partition_messages,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use self::context::ContextResolver;
pub use self::context::LoaderContext;
pub use self::options::{LoaderOptions, Minimize};
pub use self::preprocess::{PreprocessError, Preprocessor};
use crate::codegen::{GenerationError, generate};

/// Errors that abort a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The preprocessor failed.
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    /// A plugin could not finish.
    #[error(transparent)]
    Pipeline(#[from] PluginError),

    /// The module could not be generated.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Turns markup documents into JavaScript modules.
///
/// A loader holds no per-document state and may serve concurrent loads.
#[derive(Clone)]
pub struct Loader {
    options: LoaderOptions,
    minifier: Arc<dyn Minifier>,
}

impl Loader {
    /// Creates a loader minifying with [`HtmlMinifier`].
    #[must_use]
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            minifier: Arc::new(HtmlMinifier),
        }
    }

    /// Replaces the minifier.
    #[must_use]
    pub fn with_minifier(mut self, minifier: Arc<dyn Minifier>) -> Self {
        self.minifier = minifier;
        self
    }

    /// Returns the loader options.
    #[must_use]
    pub const fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Loads one document.
    ///
    /// Transform errors are reported through
    /// [`LoaderContext::emit_error`] and do not fail the load.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when preprocessing fails, a plugin cannot
    /// finish, or the module cannot be generated.
    pub async fn load(
        &self,
        content: String,
        context: &mut dyn LoaderContext,
    ) -> Result<String, LoadError> {
        let markup = match &self.options.preprocessor {
            Some(preprocessor) => {
                preprocessor
                    .preprocess(content, context.resource_path())
                    .await?
            }
            None => content,
        };

        let output = self.transform(markup, &*context)?;
        let (markup, messages) = output.into_parts();
        let partitioned = partition_messages(messages);

        for error in &partitioned.errors {
            warn!(
                target: "htmlweave::loader",
                resource = context.resource_path(),
                %error,
                "transform error"
            );
            context.emit_error(error);
        }

        let code = generate(
            &markup,
            &partitioned.imports,
            &partitioned.replacements,
            &self.options.codegen_options(),
        )?;
        info!(
            target: "htmlweave::loader",
            resource = context.resource_path(),
            imports = partitioned.imports.len(),
            errors = partitioned.errors.len(),
            "document loaded"
        );
        Ok(code)
    }

    /// Loads one document, driving the preprocessor to completion on the
    /// current thread.
    ///
    /// # Errors
    ///
    /// As for [`Loader::load`].
    pub fn load_blocking(
        &self,
        content: String,
        context: &mut dyn LoaderContext,
    ) -> Result<String, LoadError> {
        futures::executor::block_on(self.load(content, context))
    }

    fn transform(
        &self,
        markup: String,
        context: &dyn LoaderContext,
    ) -> Result<ProcessOutput, PluginError> {
        let resolver = ContextResolver(context);
        let mut runner = PipelineRunner::default();
        if self.options.attributes.is_enabled() {
            runner.push(
                SourcePlugin::new(self.options.attributes.clone(), &resolver)
                    .with_root(self.options.root.clone())
                    .with_url_filter(self.options.url_filter.clone())
                    .with_resource_path(context.resource_path()),
            );
        }
        if let Some(options) = self.options.minimize.resolve(context.is_production()) {
            runner.push(MinimizerPlugin::new(Arc::clone(&self.minifier), options));
        }
        debug!(
            target: "htmlweave::loader",
            resource = context.resource_path(),
            plugins = ?runner.plugin_names(),
            "running pipeline"
        );
        runner.process(markup)
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
