#![deny(clippy::all, clippy::pedantic)]

use latexlite::RenderClient;
use latexlite::demos::Demo;
use serde_json::json;
use tracing::{error, info};

use crate::args::DemoArgs;
use crate::client::CliError;
use crate::print::print_json;

/// Run each selected demo in order. A failing demo does not stop the others;
/// the command fails afterwards if any of them did.
pub async fn handle(client: &RenderClient, args: DemoArgs) -> Result<(), CliError> {
    let DemoArgs { output_dir, only } = args;
    let demos: Vec<Demo> = match only {
        Some(only) => vec![only.into()],
        None => Demo::ALL.to_vec(),
    };

    tokio::fs::create_dir_all(&output_dir)
        .await
        .map_err(|source| CliError::OutputDir {
            path: output_dir.display().to_string(),
            source,
        })?;

    let mut rendered = Vec::new();
    let mut failed = Vec::new();
    for demo in &demos {
        match demo.run(client, &output_dir).await {
            Ok(path) => {
                info!(demo = demo.name(), path = %path.display(), "demo rendered");
                rendered.push(path.display().to_string());
            }
            Err(err) => {
                error!(demo = demo.name(), error = %err, "demo failed");
                failed.push(json!({ "demo": demo.name(), "error": err.to_string() }));
            }
        }
    }

    print_json(&json!({ "rendered": rendered, "failed": failed }))?;

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::DemosFailed {
            failed: failed.len(),
            total: demos.len(),
        })
    }
}
