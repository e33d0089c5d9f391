//! Command-line surface for `latexlite`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use latexlite::config::Overrides;
use latexlite::demos::Demo;

#[derive(Parser, Debug)]
#[command(name = "latexlite", version, about = "LaTeX Lite rendering API client", long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "LATEXLITE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render in a single request and write the PDF (renders-sync)
    Render(RenderArgs),
    /// Create a render job, wait for it and download the PDF
    Run(RenderArgs),
    /// Render job operations (submit/status/wait/download)
    Jobs(JobsArgs),
    /// Render the bundled example documents
    Demo(DemoArgs),
}

/// Template and data sources. Files take precedence over inline values.
#[derive(Args, Debug, Default)]
pub struct TemplateInput {
    /// Template text
    #[arg(long)]
    pub template: Option<String>,
    /// Read the template from a file
    #[arg(long, value_name = "PATH")]
    pub template_file: Option<PathBuf>,
    /// Template data as a JSON object
    #[arg(long)]
    pub data: Option<String>,
    /// Read template data (a JSON object) from a file
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: TemplateInput,
    /// Where to write the PDF
    #[arg(long, short, value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub action: JobsCmd,
}

#[derive(Subcommand, Debug)]
pub enum JobsCmd {
    /// Create a render job and print it
    Submit {
        #[command(flatten)]
        input: TemplateInput,
    },
    /// Show the current state of a job
    Status { id: String },
    /// Poll a job until it succeeds or fails
    Wait {
        id: String,
        /// Give up after this many seconds (defaults to the configured wait timeout)
        #[arg(long, value_name = "SECONDS")]
        timeout_seconds: Option<u64>,
    },
    /// Download the PDF of a finished job
    Download {
        id: String,
        #[arg(long, short, value_name = "PATH")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Directory the example PDFs are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
    /// Run a single example instead of all of them
    #[arg(long, value_enum)]
    pub only: Option<DemoArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DemoArg {
    Sync,
    Simple,
    Invoice,
}

impl From<DemoArg> for Demo {
    fn from(value: DemoArg) -> Self {
        match value {
            DemoArg::Sync => Demo::Sync,
            DemoArg::Simple => Demo::Simple,
            DemoArg::Invoice => Demo::Invoice,
        }
    }
}
