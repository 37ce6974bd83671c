//! Seam through which the source plugin turns requests into module
//! specifiers.

use thiserror::Error;

/// Failure to resolve a resource request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// No resource exists for the request.
    #[error("resource '{request}' not found")]
    NotFound {
        /// The request that was looked up.
        request: String,
    },

    /// The host refused the request.
    #[error("request '{request}' rejected: {reason}")]
    Rejected {
        /// The offending request.
        request: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ResolveError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(request: impl Into<String>) -> Self {
        Self::NotFound {
            request: request.into(),
        }
    }

    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(request: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            request: request.into(),
            reason: reason.into(),
        }
    }
}

/// Turns an explicit request (`./logo.png`, `loader!./a.css`) into the
/// specifier written into the generated import statement.
pub trait RequestResolver {
    /// Resolves `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when the request cannot be satisfied.
    fn resolve(&self, request: &str) -> Result<String, ResolveError>;
}

/// Resolver that accepts every request unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassthroughResolver;

impl RequestResolver for PassthroughResolver {
    fn resolve(&self, request: &str) -> Result<String, ResolveError> {
        Ok(request.to_owned())
    }
}

impl<F> RequestResolver for F
where
    F: Fn(&str) -> Result<String, ResolveError>,
{
    fn resolve(&self, request: &str) -> Result<String, ResolveError> {
        self(request)
    }
}
