//! Command-line surface parsed after configuration flags are split off.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "htmlweave",
    version,
    about = "Compiles an HTML document into a JavaScript module"
)]
pub(crate) struct Cli {
    /// The markup document to load.
    #[arg(value_name = "INPUT")]
    pub(crate) input: PathBuf,
    /// Writes the module to this path instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub(crate) output: Option<PathBuf>,
    /// Also writes the runtime source helper to this path.
    #[arg(long, value_name = "PATH")]
    pub(crate) emit_runtime: Option<PathBuf>,
}
