#![deny(clippy::all, clippy::pedantic)]

use latexlite::ClientError;
use latexlite::config::{self, LoadError, Settings};
use latexlite::infra::error::InfraError;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Telemetry(#[from] InfraError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("{failed} of {total} demos failed")]
    DemosFailed { failed: usize, total: usize },
}

pub fn settings_from_cli(cli: &Cli) -> Result<Settings, CliError> {
    Ok(config::load(cli.config_file.as_deref(), &cli.overrides)?)
}
