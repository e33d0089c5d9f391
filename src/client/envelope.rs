//! Decoding of `{success, data, error}` response envelopes.

use latexlite_api_types::{ApiEnvelope, ApiErrorMessage};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::ClientError;

/// Longest raw body quoted in an error message.
const MAX_RAW_ERROR_CHARS: usize = 500;

/// Read a response envelope and return its `data`.
///
/// Non-2xx responses whose body is not an envelope become [`ClientError::Api`]
/// quoting the body; malformed JSON on a 2xx response is a decode error.
pub(crate) async fn read_data<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    parse_data(status, &bytes)
}

pub(crate) fn parse_data<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
) -> Result<T, ClientError> {
    let envelope: ApiEnvelope<T> = match serde_json::from_slice(bytes) {
        Ok(envelope) => envelope,
        Err(err) if status.is_success() => {
            return Err(ClientError::decode(format!("decode response: {err}")));
        }
        Err(_) => return Err(ClientError::api(error_message_from_body(status, bytes))),
    };

    envelope
        .into_result()
        .map_err(ClientError::api)?
        .ok_or_else(|| ClientError::decode("response envelope is missing data"))
}

/// Consume an error response and extract the most useful message from it.
pub(crate) async fn read_error_message(resp: Response) -> String {
    let status = resp.status();
    let bytes = resp.bytes().await.unwrap_or_default();
    error_message_from_body(status, &bytes)
}

/// Error bodies only need an `error` object; `success` may be absent.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ApiErrorMessage>,
}

/// Prefer the body's `error.message`, then the trimmed raw body, then the
/// status line.
pub(crate) fn error_message_from_body(status: StatusCode, bytes: &[u8]) -> String {
    if let Ok(body) = serde_json::from_slice::<ErrorBody>(bytes)
        && let Some(error) = body.error
        && !error.message.is_empty()
    {
        return error.message;
    }

    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.is_empty() {
        return status.to_string();
    }
    if text.chars().count() > MAX_RAW_ERROR_CHARS {
        let mut truncated: String = text.chars().take(MAX_RAW_ERROR_CHARS).collect();
        truncated.push('…');
        return truncated;
    }
    text.to_string()
}
