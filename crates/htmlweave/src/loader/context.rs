//! Host build context seam.

use htmlweave_plugins::{RequestResolver, ResolveError, TransformError};

/// The host build system as seen by the loader.
pub trait LoaderContext: Send + Sync {
    /// Path of the document being loaded.
    fn resource_path(&self) -> &str;

    /// Turns an explicit request (`./logo.png`) into the specifier written
    /// into the generated import.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when the resource cannot be found.
    fn resolve(&self, request: &str) -> Result<String, ResolveError>;

    /// Reports a transform error. Called once per error.
    fn emit_error(&mut self, error: &TransformError);

    /// Reports whether the build runs in production mode.
    fn is_production(&self) -> bool;
}

/// Exposes a [`LoaderContext`] to the source plugin.
pub(crate) struct ContextResolver<'c>(pub(crate) &'c dyn LoaderContext);

impl RequestResolver for ContextResolver<'_> {
    fn resolve(&self, request: &str) -> Result<String, ResolveError> {
        self.0.resolve(request)
    }
}
