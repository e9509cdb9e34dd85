//! Remote addon client errors and response guards

use thiserror::Error;

/// Default cap on a remote response body (16 MiB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Failure talking to a remote Stremio addon
#[derive(Debug, Error)]
pub enum ProviderClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Response too large ({size} bytes, max {max})")]
    ResponseTooLarge { size: u64, max: usize },
}

/// Reject 4xx/5xx responses before their body is read.
pub fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderClientError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ProviderClientError::Http {
            status,
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

/// Read a body of at most `max` bytes.
///
/// A declared `Content-Length` over the cap fails before anything is read;
/// otherwise the body is streamed and abandoned as soon as it passes `max`.
pub async fn read_body(mut response: reqwest::Response, max: usize) -> Result<Vec<u8>, ProviderClientError> {
    let too_large = |size: u64| ProviderClientError::ResponseTooLarge { size, max };

    if let Some(declared) = response.content_length() {
        if declared > max as u64 {
            return Err(too_large(declared));
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > max {
            return Err(too_large((body.len() + chunk.len()) as u64));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

impl From<reqwest::Error> for ProviderClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<url::ParseError> for ProviderClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
