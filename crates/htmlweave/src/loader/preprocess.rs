//! Asynchronous pre-transform applied once before the pipeline runs.

use futures::future::{self, BoxFuture};
use thiserror::Error;

/// Failure raised by a [`Preprocessor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("preprocessor failed for '{resource_path}': {message}")]
pub struct PreprocessError {
    resource_path: String,
    message: String,
}

impl PreprocessError {
    /// Creates an error for the document at `resource_path`.
    #[must_use]
    pub fn new(resource_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            message: message.into(),
        }
    }

    /// Returns the document path.
    #[must_use]
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Returns the failure detail.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Transforms raw markup before any plugin sees it.
///
/// Synchronous closures `Fn(String, &str) -> Result<String, PreprocessError>`
/// implement this trait directly.
pub trait Preprocessor: Send + Sync {
    /// Transforms `content`, read from `resource_path`.
    fn preprocess<'a>(
        &'a self,
        content: String,
        resource_path: &'a str,
    ) -> BoxFuture<'a, Result<String, PreprocessError>>;
}

impl<F> Preprocessor for F
where
    F: Fn(String, &str) -> Result<String, PreprocessError> + Send + Sync,
{
    fn preprocess<'a>(
        &'a self,
        content: String,
        resource_path: &'a str,
    ) -> BoxFuture<'a, Result<String, PreprocessError>> {
        Box::pin(future::ready(self(content, resource_path)))
    }
}
