//! Configuration loading for the CLI.
//!
//! Configuration flags must come before the input path. Everything from the
//! first argument that is not a configuration flag onwards belongs to the
//! command and is parsed by clap.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;

use htmlweave::{AttributeSelection, LoaderOptions, Minimize};
use htmlweave_config::{AttributeScope, Config, ExportStyle, MinimizeMode, ModuleFormat};

use crate::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--mode",
    "--minimize",
    "--attributes",
    "--module-format",
    "--export",
    "--root",
    "--runtime-helper",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the configuration arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn classify(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    let (flag, has_inline_value) = match text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (text.as_ref(), false),
    };
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Skip
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut arguments = args.iter().enumerate();
    let Some((_, program)) = arguments.next() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut command_start = 1;
    let mut expecting_value = false;
    for (index, argument) in arguments {
        if expecting_value {
            expecting_value = false;
        } else {
            match classify(argument) {
                FlagAction::Include { needs_value } => expecting_value = needs_value,
                FlagAction::Skip => break,
            }
        }
        config_arguments.push(argument.clone());
        command_start = index + 1;
    }

    ConfigArgumentSplit {
        config_arguments,
        command_start,
    }
}

/// Returns the program name followed by the command arguments.
pub(crate) fn command_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.iter().skip(split.command_start))
        .cloned()
        .collect()
}

/// Maps configuration onto loader options.
pub(crate) fn loader_options(config: &Config) -> LoaderOptions {
    LoaderOptions {
        attributes: match config.attributes {
            AttributeScope::Defaults => AttributeSelection::Defaults,
            AttributeScope::None => AttributeSelection::Disabled,
        },
        root: config.root.clone(),
        minimize: match config.minimize {
            MinimizeMode::Auto => Minimize::Auto,
            MinimizeMode::Always => Minimize::from(true),
            MinimizeMode::Never => Minimize::from(false),
        },
        es_module: matches!(config.module_format, ModuleFormat::Esm),
        export_as_function: matches!(config.export, ExportStyle::Function),
        runtime_helper: config.runtime_helper.clone(),
        ..LoaderOptions::default()
    }
}
