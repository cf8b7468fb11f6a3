use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when using the FOFA API client
#[derive(Debug, Error)]
pub enum FofaError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// API error returned by FOFA
    #[error("API error: {0:?}")]
    Api(ApiErrorObject),

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// API error object from FOFA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Human-readable error message
    #[serde(default)]
    pub errmsg: String,
    /// Error flag as reported by the API
    #[serde(default)]
    pub error: Option<bool>,
}

/// Maps a serde deserialization error to a `FofaError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> FofaError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    FofaError::Serde(format!("{e}: {snippet}"))
}

/// Deserializes an API error from the response body
///
/// Attempts to parse the error as JSON, falling back to plain text on failure.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> FofaError {
    let status_code = Some(status.as_u16());

    if let Ok(mut obj) = serde_json::from_slice::<ApiErrorObject>(body) {
        obj.status_code = status_code;
        return FofaError::Api(obj);
    }

    // Server may return plain text on 5xx; cap body to avoid log/memory bloat
    FofaError::Api(ApiErrorObject {
        status_code,
        errmsg: String::from_utf8_lossy(&body[..body.len().min(400)]).into_owned(),
        error: Some(true),
    })
}
