//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use htmlweave::LoadError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read '{}': {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error("failed to load '{}': {source}", .path.display())]
    Load { path: PathBuf, source: LoadError },
    #[error("failed to write '{}': {source}", .path.display())]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("failed to write module to standard output: {0}")]
    WriteStdout(io::Error),
}
