#![deny(clippy::all, clippy::pedantic)]

use latexlite::RenderClient;
use serde_json::json;

use crate::args::RenderArgs;
use crate::client::CliError;
use crate::io::read_request;
use crate::print::print_json;

pub async fn sync(client: &RenderClient, args: RenderArgs) -> Result<(), CliError> {
    let request = read_request(args.input)?;
    let written = client.render_sync(&request, &args.output).await?;
    print_json(&json!({
        "path": args.output.display().to_string(),
        "bytes": written,
    }))
}

pub async fn run(client: &RenderClient, args: RenderArgs) -> Result<(), CliError> {
    let request = read_request(args.input)?;
    let job = client.create_and_wait(&request, &args.output).await?;
    print_json(&json!({
        "job": job,
        "path": args.output.display().to_string(),
    }))
}
