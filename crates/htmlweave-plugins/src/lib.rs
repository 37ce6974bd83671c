//! Transform plugins and the pipeline that runs them.
//!
//! A document is processed by folding it through an ordered list of
//! [`Plugin`]s with a [`PipelineRunner`]. Plugins communicate with the driver
//! only through [`Message`]s: imports to declare, placeholders to substitute
//! and reportable errors.
//!
//! Two plugins are provided:
//!
//! - [`SourcePlugin`] rewrites resource URLs found in attributes into unique
//!   placeholder tokens and emits an [`Import`] and a [`Replacement`] for each
//! - [`MinimizerPlugin`] minifies the rewritten markup while keeping every
//!   placeholder intact
//!
//! # Example
//!
//! ```
//! use htmlweave_plugins::{
//!     AttributeSelection, PassthroughResolver, PipelineRunner, Plugin, SourcePlugin,
//!     partition_messages,
//! };
//!
//! let resolver = PassthroughResolver;
//! let plugins: Vec<Box<dyn Plugin + '_>> = vec![Box::new(SourcePlugin::new(
//!     AttributeSelection::Defaults,
//!     &resolver,
//! ))];
//! let output = PipelineRunner::new(plugins).process("<img src=\"logo.png\">")?;
//! let (markup, messages) = output.into_parts();
//!
//! assert_eq!(markup, "<img src=\"___HTML_LOADER_REPLACEMENT_0___\">");
//! let partitioned = partition_messages(messages);
//! assert_eq!(partitioned.imports.len(), 1);
//! # Ok::<(), htmlweave_plugins::PluginError>(())
//! ```

pub mod context;
pub mod error;
pub mod minimize;
pub mod placeholder;
pub mod protocol;
pub mod resolve;
pub mod runner;
pub mod source;

pub use self::context::DocumentContext;
pub use self::error::PluginError;
pub use self::minimize::{HtmlMinifier, Minifier, MinifyError, MinimizeOptions, MinimizerPlugin};
pub use self::placeholder::{DEFAULT_PLACEHOLDER_PREFIX, IMPORT_PREFIX, PlaceholderAllocator};
pub use self::protocol::{
    Import, ImportKind, ImportOptions, Message, PartitionedMessages, Replacement,
    ReplacementOptions, ReplacementValue, TransformError, partition_messages,
};
pub use self::resolve::{PassthroughResolver, RequestResolver, ResolveError};
pub use self::runner::{PipelineRunner, Plugin, ProcessOutput};
pub use self::source::{
    AttributeCandidate, AttributeFilter, AttributePredicate, AttributeSelection, AttributeSpec,
    SourceKind, SourcePlugin, UrlFilter, default_attributes,
};

#[cfg(test)]
mod tests;
