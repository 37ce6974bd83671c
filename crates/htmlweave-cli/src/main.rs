//! CLI entrypoint for htmlweave.
//!
//! The binary delegates to [`htmlweave_cli::run`], which loads configuration,
//! compiles the input document and writes the generated module.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    htmlweave_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
