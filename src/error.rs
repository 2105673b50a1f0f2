use thiserror::Error;

use crate::client::ApiResponse;
use crate::models::ErrorResponse;

/// Error type for Cloudcraft API operations.
///
/// - `Transport` — network/connection errors (wraps `reqwest::Error`);
///   the request never produced a response
/// - `Url` — a relative path failed to resolve against the base URL
/// - `Header` — a configured value (API key, user agent) is not a legal
///   header value
/// - `Decode` — a request body could not be serialized, or a success
///   response body could not be deserialized
/// - `Api` — the server answered with status >= 400; carries the decoded
///   error envelope and the raw response metadata
#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request path: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("JSON encode/decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error: {error}")]
    Api {
        error: ErrorResponse,
        response: ApiResponse,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
