//! Enumerated loader settings.
//!
//! Every setting is an enum rather than a flag so that the command line, the
//! environment and configuration files all accept the same spelling.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Build mode reported to the loader.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BuildMode {
    /// Development build; markup is left as written unless minification is
    /// forced.
    #[default]
    Development,
    /// Production build; markup is minified unless minification is disabled.
    Production,
}

/// Minification policy.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MinimizeMode {
    /// Follow the build mode.
    #[default]
    Auto,
    /// Always minify.
    Always,
    /// Never minify.
    Never,
}

/// Which attributes are rewritten into imports.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeScope {
    /// The built-in attribute list.
    #[default]
    Defaults,
    /// No attributes; the markup is exported unchanged.
    None,
}

/// Module system of the generated code.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModuleFormat {
    /// `import` declarations and `export default`.
    #[default]
    Esm,
    /// `require` calls and `module.exports`.
    #[strum(to_string = "commonjs", serialize = "cjs")]
    #[serde(rename = "commonjs", alias = "cjs")]
    CommonJs,
}

/// Shape of the default export.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ExportStyle {
    /// Export the markup string.
    #[default]
    Value,
    /// Export a function returning the markup string.
    Function,
}
