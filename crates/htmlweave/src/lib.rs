//! Turns markup documents into JavaScript modules.
//!
//! A [`Loader`] scans a document for resource references (`<img src>`,
//! `srcset`, `<link href>` and friends), replaces each with a placeholder,
//! optionally minifies the result, and generates a module that imports every
//! resource and exports the markup with the resolved URLs substituted back
//! in.
//!
//! The host supplies a [`LoaderContext`] which resolves requests and receives
//! non-fatal transform errors.
//!
//! # Example
//!
//! ```
//! use htmlweave::{Loader, LoaderContext, LoaderOptions, ResolveError, TransformError};
//!
//! struct Host(Vec<String>);
//!
//! impl LoaderContext for Host {
//!     fn resource_path(&self) -> &str { "/site/index.html" }
//!     fn resolve(&self, request: &str) -> Result<String, ResolveError> {
//!         Ok(request.to_owned())
//!     }
//!     fn emit_error(&mut self, error: &TransformError) { self.0.push(error.to_string()); }
//!     fn is_production(&self) -> bool { false }
//! }
//!
//! let mut host = Host(Vec::new());
//! let module = Loader::new(LoaderOptions::default())
//!     .load_blocking("<img src=\"logo.png\">".to_owned(), &mut host)?;
//!
//! assert!(module.contains("import ___HTML_LOADER_IMPORT_0___ from \"./logo.png\";"));
//! assert!(module.ends_with("export default code;"));
//! assert!(host.0.is_empty());
//! # Ok::<(), htmlweave::LoadError>(())
//! ```

pub mod codegen;
pub mod loader;
pub mod runtime;

pub use codegen::{
    CodegenOptions, DEFAULT_RUNTIME_HELPER, GenerationError, SOURCE_HELPER, Segment, generate,
    split_markup,
};
pub use htmlweave_plugins::{
    AttributeSelection, AttributeSpec, HtmlMinifier, Minifier, MinifyError, MinimizeOptions,
    ResolveError, SourceKind, TransformError, UrlFilter, default_attributes,
};
pub use loader::{
    LoadError, Loader, LoaderContext, LoaderOptions, Minimize, PreprocessError, Preprocessor,
};
pub use runtime::GET_SOURCE_RUNTIME;

#[cfg(test)]
mod tests;
