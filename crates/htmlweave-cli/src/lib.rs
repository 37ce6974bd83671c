//! Command-line runtime for htmlweave.
//!
//! The runtime splits configuration flags from the command, loads layered
//! configuration, compiles one markup document with [`htmlweave::Loader`] and
//! writes the generated module. Transform errors are printed after the module
//! is written and turn the exit status into a failure.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use htmlweave::{GET_SOURCE_RUNTIME, Loader};
use htmlweave_config::Config;
use tracing::debug;

mod cli;
mod config;
mod context;
mod errors;
pub mod telemetry;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, command_arguments, loader_options};
use context::FsContext;
pub(crate) use errors::AppError;

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    stdout: &'a mut W,
    stderr: &'a mut E,
    loader: &'a L,
}

impl<W, E, L> CliRunner<'_, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = config::split_config_arguments(&args);

        let result = Cli::try_parse_from(command_arguments(&args, &split))
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                self.loader
                    .load(&split.config_arguments)
                    .map(|config| (cli, config))
            })
            .and_then(|(cli, config)| self.compile(&cli, &config));

        match result {
            Ok(exit_code) => exit_code,
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                let _ = write!(self.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn compile(&mut self, cli: &Cli, config: &Config) -> Result<ExitCode, AppError> {
        telemetry::initialise(config)?;
        debug!(
            target: "htmlweave::cli",
            input = %cli.input.display(),
            mode = %config.mode,
            minimize = config.minimize_enabled(),
            "compiling document"
        );

        let markup = fs::read_to_string(&cli.input).map_err(|source| AppError::ReadInput {
            path: cli.input.clone(),
            source,
        })?;
        let mut context = FsContext::new(&cli.input, config.is_production());
        let module = Loader::new(loader_options(config))
            .load_blocking(markup, &mut context)
            .map_err(|source| AppError::Load {
                path: cli.input.clone(),
                source,
            })?;

        match &cli.output {
            Some(path) => write_file(path, &module)?,
            None => writeln!(self.stdout, "{module}").map_err(AppError::WriteStdout)?,
        }
        if let Some(path) = &cli.emit_runtime {
            write_file(path, GET_SOURCE_RUNTIME)?;
        }

        for error in context.errors() {
            let _ = writeln!(self.stderr, "error: {error}");
        }
        if context.errors().is_empty() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }
}

fn write_file(path: &std::path::Path, contents: &str) -> Result<(), AppError> {
    fs::write(path, contents).map_err(|source| AppError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner {
        stdout,
        stderr,
        loader,
    }
    .run(args)
}
