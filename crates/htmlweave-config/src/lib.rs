//! Layered configuration for the htmlweave command-line tool.
//!
//! [`Config`] merges defaults, a TOML configuration file, `HTMLWEAVE_*`
//! environment variables and command-line flags, in increasing order of
//! precedence. Loading goes through `ortho_config`; every failing source is
//! reported rather than only the first.

mod defaults;
mod logging;
mod modes;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_RUNTIME_HELPER, default_log_filter_string, default_log_format,
    default_runtime_helper_string,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use modes::{AttributeScope, BuildMode, ExportStyle, MinimizeMode, ModuleFormat};

/// Settings shared by the binary and its loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HTMLWEAVE")]
pub struct Config {
    /// `tracing` filter directive.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Build mode reported to the loader.
    #[ortho_config(default = BuildMode::Development)]
    pub mode: BuildMode,
    /// Minification policy.
    #[ortho_config(default = MinimizeMode::Auto)]
    pub minimize: MinimizeMode,
    /// Attributes rewritten into imports.
    #[ortho_config(default = AttributeScope::Defaults)]
    pub attributes: AttributeScope,
    /// Module system of the generated code.
    #[ortho_config(default = ModuleFormat::Esm)]
    pub module_format: ModuleFormat,
    /// Shape of the default export.
    #[ortho_config(default = ExportStyle::Value)]
    pub export: ExportStyle,
    /// Prefix making root-relative URLs requestable.
    pub root: Option<String>,
    /// Request used to import the runtime source helper.
    #[ortho_config(default = default_runtime_helper_string())]
    pub runtime_helper: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            mode: BuildMode::default(),
            minimize: MinimizeMode::default(),
            attributes: AttributeScope::default(),
            module_format: ModuleFormat::default(),
            export: ExportStyle::default(),
            root: None,
            runtime_helper: default_runtime_helper_string(),
        }
    }
}

impl Config {
    /// Returns the log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns `true` for production builds.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self.mode, BuildMode::Production)
    }

    /// Returns whether markup is minified under this configuration.
    #[must_use]
    pub const fn minimize_enabled(&self) -> bool {
        match self.minimize {
            MinimizeMode::Auto => self.is_production(),
            MinimizeMode::Always => true,
            MinimizeMode::Never => false,
        }
    }
}
