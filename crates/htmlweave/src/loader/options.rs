//! Loader configuration.

use std::fmt;
use std::sync::Arc;

use htmlweave_plugins::{AttributeSelection, MinimizeOptions, UrlFilter};

use super::preprocess::Preprocessor;
use crate::codegen::{CodegenOptions, DEFAULT_RUNTIME_HELPER};

/// Whether the minimizer runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Minimize {
    /// Minify in production mode only, with default options.
    #[default]
    Auto,
    /// Never minify.
    Disabled,
    /// Always minify with these options.
    Enabled(MinimizeOptions),
}

impl Minimize {
    /// Returns the options to minify with, if minification applies.
    #[must_use]
    pub fn resolve(self, is_production: bool) -> Option<MinimizeOptions> {
        match self {
            Self::Auto => is_production.then(MinimizeOptions::default),
            Self::Disabled => None,
            Self::Enabled(options) => Some(options),
        }
    }
}

impl From<bool> for Minimize {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled(MinimizeOptions::default())
        } else {
            Self::Disabled
        }
    }
}

/// Options controlling one [`Loader`](crate::Loader).
#[derive(Clone)]
pub struct LoaderOptions {
    /// Attributes whose URLs are imported.
    pub attributes: AttributeSelection,
    /// Extra veto over requestable URLs.
    pub url_filter: Option<UrlFilter>,
    /// Prefix making root-relative URLs requestable.
    pub root: Option<String>,
    /// Minification policy.
    pub minimize: Minimize,
    /// Emit an ES module rather than CommonJS.
    pub es_module: bool,
    /// Export a function returning the markup.
    pub export_as_function: bool,
    /// Request used to import the runtime source helper.
    pub runtime_helper: String,
    /// Optional pre-transform of the raw markup.
    pub preprocessor: Option<Arc<dyn Preprocessor>>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            attributes: AttributeSelection::Defaults,
            url_filter: None,
            root: None,
            minimize: Minimize::Auto,
            es_module: true,
            export_as_function: false,
            runtime_helper: DEFAULT_RUNTIME_HELPER.to_owned(),
            preprocessor: None,
        }
    }
}

impl LoaderOptions {
    /// Returns the code generation options implied by these options.
    #[must_use]
    pub fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            es_module: self.es_module,
            export_as_function: self.export_as_function,
            runtime_helper: self.runtime_helper.clone(),
        }
    }
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("attributes", &self.attributes)
            .field("url_filter", &self.url_filter)
            .field("root", &self.root)
            .field("minimize", &self.minimize)
            .field("es_module", &self.es_module)
            .field("export_as_function", &self.export_as_function)
            .field("runtime_helper", &self.runtime_helper)
            .field("preprocessor", &self.preprocessor.as_ref().map(|_| ".."))
            .finish()
    }
}
