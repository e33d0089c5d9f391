//! Error handling for the render client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use latexlite_api_types::RenderJob;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection failures, timeouts and other transport problems.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response could not be decoded (malformed JSON, bad base64, missing fields).
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// A well-formed envelope reporting `success: false`.
    #[error("API error: {message}")]
    Api { message: String },

    /// The poll loop gave up; `job` is the last state observed.
    #[error(
        "timeout waiting for job {} to complete (last status {}, waited {:?})",
        .job.id,
        .job.status.as_str(),
        .waited
    )]
    Timeout { job: Box<RenderJob>, waited: Duration },

    #[error("failed to download PDF: {status}: {message}")]
    Download { status: StatusCode, message: String },

    #[error("job {job_id} failed: {message}")]
    JobFailed { job_id: String, message: String },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("API key is not a valid header value")]
    InvalidApiKey,
}

impl ClientError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The last job observed before a poll timeout.
    pub fn timed_out_job(&self) -> Option<&RenderJob> {
        match self {
            Self::Timeout { job, .. } => Some(job.as_ref()),
            _ => None,
        }
    }
}
