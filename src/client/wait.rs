//! Polling a render job until it reaches a terminal status.

use std::time::Duration;

use async_trait::async_trait;
use latexlite_api_types::RenderJob;
use tokio::time::{Instant, sleep};
use tracing::debug;

use super::error::ClientError;

/// Anything that can report the current state of a render job.
#[async_trait]
pub trait JobSource {
    async fn fetch_job(&self, job_id: &str) -> Result<RenderJob, ClientError>;
}

/// Fetch `job_id` every `interval` until it succeeds or fails.
///
/// Once more than `timeout` has elapsed the loop stops with
/// [`ClientError::Timeout`], which carries the last job observed. Fetch errors
/// end the loop immediately.
pub async fn wait_for_terminal<S>(
    source: &S,
    job_id: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<RenderJob, ClientError>
where
    S: JobSource + Sync + ?Sized,
{
    let started = Instant::now();
    loop {
        let job = source.fetch_job(job_id).await?;
        if job.is_terminal() {
            debug!(job_id, status = job.status.as_str(), "job finished");
            return Ok(job);
        }

        let waited = started.elapsed();
        if waited > timeout {
            return Err(ClientError::Timeout {
                job: Box::new(job),
                waited,
            });
        }

        debug!(job_id, status = job.status.as_str(), "job still in progress");
        sleep(interval).await;
    }
}
