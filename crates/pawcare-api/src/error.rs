//! API error types.

use thiserror::Error;

/// Errors surfaced by the REST client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Not authorized (HTTP {status})")]
    Forbidden { status: u16 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Coarse error classification for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Forbidden,
    NotFound,
    Server,
    Decode,
}

impl ApiError {
    /// Map a non-success status code to an error.
    pub fn from_status(status: u16, path: &str, body: String) -> Self {
        match status {
            401 | 403 => ApiError::Forbidden { status },
            404 => ApiError::NotFound(path.to_string()),
            _ => ApiError::Status {
                status,
                message: if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body
                },
            },
        }
    }

    /// Get the coarse error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Forbidden { .. } => ErrorKind::Forbidden,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Status { .. } => ErrorKind::Server,
            ApiError::Decode(_) | ApiError::InvalidUrl(_) => ErrorKind::Decode,
        }
    }

    /// True for HTTP 401/403.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Forbidden { .. })
    }

    /// True for HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// HTTP status code, if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Forbidden { status } | ApiError::Status { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_forbidden() {
        assert!(ApiError::from_status(401, "/api/Clinic", String::new()).is_forbidden());
        assert!(ApiError::from_status(403, "/api/Clinic", String::new()).is_forbidden());
    }

    #[test]
    fn test_from_status_not_found() {
        let err = ApiError::from_status(404, "/api/Basket", String::new());
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_from_status_server_keeps_body() {
        let err = ApiError::from_status(500, "/api/Pet", "boom".into());
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.to_string(), "Request failed with HTTP 500: boom");

        let empty = ApiError::from_status(502, "/api/Pet", String::new());
        assert_eq!(empty.to_string(), "Request failed with HTTP 502: HTTP 502");
    }
}
