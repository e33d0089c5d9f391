//! LaTeX Lite render client
//!
//! Wraps the four render endpoints: synchronous render, job creation, job
//! status and PDF download. All calls are sequential; the only loop is the
//! fixed-interval poll in [`wait_for_terminal`].

mod artifact;
mod envelope;
mod error;
mod wait;


use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use latexlite_api_types::{ApiEnvelope, RenderJob, RenderRequest, SyncRenderData};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, info, instrument};

use crate::config::ApiSettings;

pub use error::ClientError;
pub use wait::{JobSource, wait_for_terminal};

const PDF_MIME: &str = "application/pdf";

#[derive(Clone, Debug)]
pub struct RenderClient {
    http: Client,
    base: Url,
    key: String,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl RenderClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base: settings.base_url.clone(),
            key: settings.api_key.clone(),
            poll_interval: settings.poll_interval,
            wait_timeout: settings.wait_timeout,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("latexlite/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    fn auth_header(&self) -> Result<HeaderValue, ClientError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.key))
            .map_err(|_| ClientError::InvalidApiKey)?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Append path segments to the base URL, keeping any prefix it carries and
    /// percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Submit an asynchronous render job (`POST /v1/renders`).
    #[instrument(skip_all)]
    pub async fn create(&self, request: &RenderRequest) -> Result<RenderJob, ClientError> {
        let url = self.endpoint(&["v1", "renders"])?;
        debug!(%url, "creating render job");

        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.auth_header()?)
            .json(request)
            .send()
            .await?;
        let job: RenderJob = envelope::read_data(resp).await?;

        info!(job_id = %job.id, status = job.status.as_str(), "render job created");
        Ok(job)
    }

    /// Fetch the current state of a job (`GET /v1/renders/{id}`).
    #[instrument(skip(self))]
    pub async fn poll(&self, job_id: &str) -> Result<RenderJob, ClientError> {
        let url = self.endpoint(&["v1", "renders", job_id])?;

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth_header()?)
            .send()
            .await?;
        envelope::read_data(resp).await
    }

    /// Poll `job_id` at the configured interval until it succeeds or fails.
    pub async fn wait_until_terminal(
        &self,
        job_id: &str,
        timeout: Duration,
    ) -> Result<RenderJob, ClientError> {
        wait_for_terminal(self, job_id, timeout, self.poll_interval).await
    }

    /// Download the PDF of a finished job (`GET /v1/renders/{id}/pdf`).
    ///
    /// Only a `200 OK` is accepted; on any other status `destination` is left
    /// untouched.
    #[instrument(skip(self, destination), fields(path = %destination.display()))]
    pub async fn download(&self, job_id: &str, destination: &Path) -> Result<u64, ClientError> {
        let url = self.endpoint(&["v1", "renders", job_id, "pdf"])?;

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth_header()?)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let message = envelope::read_error_message(resp).await;
            return Err(ClientError::Download { status, message });
        }

        let written = artifact::stream_to_file(resp, destination).await?;
        info!(job_id, bytes = written, "PDF downloaded");
        Ok(written)
    }

    /// Render in a single call (`POST /v1/renders-sync`) and write the PDF to
    /// `destination`.
    ///
    /// The service answers either with raw `application/pdf` bytes or with a
    /// JSON envelope carrying `pdf_base64`; both are accepted.
    #[instrument(skip_all, fields(path = %destination.display()))]
    pub async fn render_sync(
        &self,
        request: &RenderRequest,
        destination: &Path,
    ) -> Result<u64, ClientError> {
        let url = self.endpoint(&["v1", "renders-sync"])?;
        debug!(%url, "rendering synchronously");

        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.auth_header()?)
            .header(ACCEPT, PDF_MIME)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = envelope::read_error_message(resp).await;
            return Err(ClientError::api(message));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let written = if content_type.to_ascii_lowercase().starts_with(PDF_MIME) {
            artifact::stream_to_file(resp, destination).await?
        } else {
            let bytes = resp.bytes().await?;
            let pdf = decode_sync_envelope(&content_type, &bytes)?;
            artifact::write_bytes(destination, &pdf).await?
        };

        info!(bytes = written, "PDF rendered");
        Ok(written)
    }

    /// Create a job, wait for it, and download the PDF if it succeeded.
    ///
    /// A failed job is reported as [`ClientError::JobFailed`] with the
    /// compiler log appended to the service message.
    pub async fn create_and_wait(
        &self,
        request: &RenderRequest,
        destination: &Path,
    ) -> Result<RenderJob, ClientError> {
        let created = self.create(request).await?;
        let job = self
            .wait_until_terminal(&created.id, self.wait_timeout)
            .await?;

        if !job.succeeded() {
            return Err(ClientError::JobFailed {
                job_id: job.id.clone(),
                message: job.failure_message(),
            });
        }

        self.download(&job.id, destination).await?;
        Ok(job)
    }
}

#[async_trait]
impl JobSource for RenderClient {
    async fn fetch_job(&self, job_id: &str) -> Result<RenderJob, ClientError> {
        self.poll(job_id).await
    }
}

fn decode_sync_envelope(content_type: &str, bytes: &[u8]) -> Result<Vec<u8>, ClientError> {
    let envelope: ApiEnvelope<SyncRenderData> = serde_json::from_slice(bytes).map_err(|err| {
        ClientError::decode(format!(
            "expected PDF but got {content_type:?} and JSON decode failed: {err}"
        ))
    })?;

    let encoded = envelope
        .into_result()
        .map_err(ClientError::api)?
        .map(|data| data.pdf_base64)
        .filter(|encoded| !encoded.is_empty())
        .ok_or_else(|| ClientError::decode("missing pdf_base64 in response"))?;

    STANDARD
        .decode(encoded.as_bytes())
        .map_err(|err| ClientError::decode(format!("decode pdf_base64: {err}")))
}
