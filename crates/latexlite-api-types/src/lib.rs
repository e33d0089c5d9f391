//! Request and response shapes for the LaTeX Lite rendering API.
//!
//! Every JSON response is wrapped in an [`ApiEnvelope`]: a `success` flag plus
//! either `data` or `error`.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub mod template;

pub use template::{TemplateData, TemplateValue};

/// Message used when the service reports a failure without explaining it.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Body of `POST /v1/renders` and `POST /v1/renders-sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub template: String,
    pub data: TemplateData,
}

impl RenderRequest {
    pub fn new(template: impl Into<String>, data: TemplateData) -> Self {
        Self {
            template: template.into(),
            data,
        }
    }
}

/// Render job lifecycle as reported by the service.
///
/// The status set belongs to the service; values this client does not know
/// are kept verbatim in [`JobStatus::Other`] and never count as terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => JobStatus::Pending,
            "running" => JobStatus::Running,
            "succeeded" => JobStatus::Succeeded,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Other(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a JSON response from `POST /v1/renders-sync`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRenderData {
    #[serde(default)]
    pub pdf_base64: String,
}

/// Wrapper shared by every JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorMessage>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorMessage {
                message: message.into(),
            }),
        }
    }

    /// The service-provided error message, or [`UNKNOWN_ERROR`].
    pub fn error_message(&self) -> &str {
        self.error
            .as_ref()
            .map(|e| e.message.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(UNKNOWN_ERROR)
    }

    /// Split the envelope into its payload or the reported error message.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error_message().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn job_envelope_parses_timestamps() {
        let body = json!({
            "success": true,
            "data": {
                "id": "job_123",
                "status": "running",
                "created_at": "2025-12-14T10:00:00Z",
                "expires_at": "2025-12-15T10:00:00Z"
            }
        });

        let envelope: ApiEnvelope<RenderJob> = serde_json::from_value(body).expect("parse");
        let job = envelope.into_result().expect("success").expect("data");
        assert_eq!(job.id, "job_123");
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.created_at, Some(datetime!(2025-12-14 10:00:00 UTC)));
        assert_eq!(job.expires_at, Some(datetime!(2025-12-15 10:00:00 UTC)));
        assert!(!job.is_terminal());
    }

    #[test]
    fn unrecognised_status_is_kept_verbatim() {
        let job: RenderJob =
            serde_json::from_value(json!({"id": "j", "status": "queued"})).expect("parse");
        assert_eq!(job.status, JobStatus::Other("queued".into()));
        assert!(!job.is_terminal());

        let printed = serde_json::to_value(&job).expect("serialize");
        assert_eq!(printed, json!({"id": "j", "status": "queued"}));
    }

    #[test]
    fn known_statuses_serialize_lowercase() {
        for (raw, status) in [
            ("pending", JobStatus::Pending),
            ("running", JobStatus::Running),
            ("succeeded", JobStatus::Succeeded),
            ("failed", JobStatus::Failed),
        ] {
            assert_eq!(JobStatus::from(raw.to_string()), status);
            assert_eq!(serde_json::to_value(&status).expect("serialize"), json!(raw));
        }
    }

    #[test]
    fn failed_envelope_reports_message() {
        let envelope: ApiEnvelope<RenderJob> = serde_json::from_value(json!({
            "success": false,
            "error": {"message": "bad template"}
        }))
        .expect("parse");
        assert_eq!(envelope.into_result(), Err("bad template".to_string()));
    }

    #[test]
    fn failed_envelope_without_message_is_unknown() {
        let envelope: ApiEnvelope<SyncRenderData> =
            serde_json::from_value(json!({"success": false})).expect("parse");
        assert_eq!(envelope.error_message(), UNKNOWN_ERROR);
    }

    #[test]
    fn failure_message_appends_log() {
        let job = RenderJob {
            id: "j".into(),
            status: JobStatus::Failed,
            created_at: None,
            expires_at: None,
            error: Some(ApiErrorMessage {
                message: "compile error".into(),
            }),
            log: Some("! Undefined control sequence.".into()),
        };
        assert_eq!(
            job.failure_message(),
            "compile error\n\nLaTeX log:\n! Undefined control sequence."
        );
    }

    #[test]
    fn failure_message_defaults_when_service_is_silent() {
        let job: RenderJob =
            serde_json::from_value(json!({"id": "j", "status": "failed", "log": ""}))
                .expect("parse");
        assert_eq!(job.failure_message(), UNKNOWN_ERROR);
    }

    #[test]
    fn request_serializes_template_and_data() {
        let req = RenderRequest::new("Hello, [[.Who]]!", TemplateData::new().with("Who", "x"));
        assert_eq!(
            serde_json::to_value(&req).expect("serialize"),
            json!({"template": "Hello, [[.Who]]!", "data": {"Who": "x"}})
        );
    }
}
