//! latexlite: command-line client for the LaTeX Lite rendering API.
//! Command output goes to stdout as JSON; logs go to stderr.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;


use clap::Parser;
use latexlite::RenderClient;
use latexlite::infra::telemetry;
use tracing::{debug, warn};

use args::{Cli, Commands};
use client::{CliError, settings_from_cli};
use handlers::{demo, jobs, render};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = settings_from_cli(&cli)?;
    telemetry::init(&settings.logging)?;

    if settings.api.uses_demo_key() {
        warn!("no API key configured; requests use the placeholder key");
    }
    debug!(
        base_url = %settings.api.base_url,
        api_key = settings.api.key_preview(),
        "client configured"
    );
    let client = RenderClient::new(&settings.api)?;

    match cli.command {
        Commands::Render(args) => render::sync(&client, args).await?,
        Commands::Run(args) => render::run(&client, args).await?,
        Commands::Jobs(cmd) => jobs::handle(&client, cmd.action).await?,
        Commands::Demo(args) => demo::handle(&client, args).await?,
    }

    Ok(())
}
