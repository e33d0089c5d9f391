#![deny(clippy::all, clippy::pedantic)]

use std::path::Path;
use std::time::Duration;

use latexlite::RenderClient;
use serde_json::json;

use crate::args::JobsCmd;
use crate::client::CliError;
use crate::io::read_request;
use crate::print::print_json;

pub async fn handle(client: &RenderClient, cmd: JobsCmd) -> Result<(), CliError> {
    match cmd {
        JobsCmd::Submit { input } => {
            let request = read_request(input)?;
            let job = client.create(&request).await?;
            print_json(&job)
        }
        JobsCmd::Status { id } => {
            let job = client.poll(&id).await?;
            print_json(&job)
        }
        JobsCmd::Wait {
            id,
            timeout_seconds,
        } => wait(client, &id, timeout_seconds).await,
        JobsCmd::Download { id, output } => download(client, &id, &output).await,
    }
}

async fn wait(
    client: &RenderClient,
    id: &str,
    timeout_seconds: Option<u64>,
) -> Result<(), CliError> {
    let timeout = timeout_seconds.map_or(client.wait_timeout(), Duration::from_secs);
    match client.wait_until_terminal(id, timeout).await {
        Ok(job) => print_json(&job),
        Err(err) => {
            // The last observed state is still useful to the caller.
            if let Some(job) = err.timed_out_job() {
                print_json(job)?;
            }
            Err(err.into())
        }
    }
}

async fn download(client: &RenderClient, id: &str, output: &Path) -> Result<(), CliError> {
    let written = client.download(id, output).await?;
    print_json(&json!({
        "job_id": id,
        "path": output.display().to_string(),
        "bytes": written,
    }))
}
