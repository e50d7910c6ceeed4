//! Error types for the folio client.

use folio_core::{FetchError, StorageError, ThemeError};

use crate::config::ConfigError;

/// Failures talking to the folio API.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<serde_json::Error> for ApiClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<ApiClientError> for FetchError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Http(e) if e.is_timeout() => FetchError::Timeout,
            ApiClientError::Http(e) if e.is_decode() => FetchError::Decode {
                reason: e.to_string(),
            },
            ApiClientError::Http(e) => FetchError::Transport {
                reason: e.to_string(),
            },
            ApiClientError::Status { status, message } => FetchError::Status { status, message },
            ApiClientError::Decode(reason) => FetchError::Decode { reason },
            ApiClientError::InvalidUrl(reason) => FetchError::Transport { reason },
        }
    }
}

/// Top-level error for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiClientError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_fetch_status() {
        let err = ApiClientError::Status {
            status: 404,
            message: "PROFILE_NOT_FOUND: Profile not found".to_string(),
        };
        let fetch: FetchError = err.into();
        assert!(fetch.is_not_found());
    }

    #[test]
    fn test_decode_maps_to_fetch_decode() {
        let err: ApiClientError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(FetchError::from(err), FetchError::Decode { .. }));
    }
}
