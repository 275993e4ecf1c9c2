//! Error types for the library layer.

use std::fmt;
use std::time::Duration;

/// Why a page fetch failed.
///
/// A stale page (404 on a page past the first) never shows up here: the
/// fetcher recovers from it by reloading page 1.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The server answered 401. The session was logged out before this
    /// error was produced.
    #[error("Session expired, please log in again")]
    Unauthorized(#[source] classroom_api::Error),
    /// Network failure, non-success status, or an undecodable body.
    #[error("{message}")]
    Transient {
        message: String,
        #[source]
        source: classroom_api::Error,
    },
    /// The query was rejected before anything was sent.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// The caller's deadline expired before the page arrived.
    #[error("Timed out after {0:?}")]
    TimedOut(Duration),
}

impl FetchError {
    /// Wraps a pipeline error in the variant the caller should react to.
    pub fn from_api(err: classroom_api::Error) -> Self {
        if err.is_unauthorized() {
            return FetchError::Unauthorized(err);
        }
        let message = match err.status() {
            Some(status) => format!("Failed to load data (HTTP {})", status),
            None => format!("Failed to load data: {}", err),
        };
        FetchError::Transient {
            message,
            source: err,
        }
    }

    /// Underlying pipeline error, when there is one.
    pub fn cause(&self) -> Option<&classroom_api::Error> {
        match self {
            FetchError::Unauthorized(e) => Some(e),
            FetchError::Transient { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding fetch, serialization, and input validation failures.
#[derive(Debug)]
pub enum ClassroomError {
    /// An error from the underlying API client.
    Api(classroom_api::Error),
    /// A paginated fetch failed.
    Fetch(FetchError),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for ClassroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Fetch(e) => write!(f, "Fetch error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ClassroomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Fetch(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<classroom_api::Error> for ClassroomError {
    fn from(e: classroom_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<FetchError> for ClassroomError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

impl From<serde_json::Error> for ClassroomError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_kept_apart() {
        let err = FetchError::from_api(classroom_api::Error::Unauthorized {
            body: String::new(),
        });
        assert!(matches!(err, FetchError::Unauthorized(_)));
        assert!(err.cause().unwrap().is_unauthorized());
    }

    #[test]
    fn http_errors_become_transient_with_status() {
        let err = FetchError::from_api(classroom_api::Error::HttpStatus {
            status: 503,
            body: "down".to_string(),
        });
        assert_eq!(err.to_string(), "Failed to load data (HTTP 503)");
        assert_eq!(err.cause().and_then(|c| c.status()), Some(503));
    }

    #[test]
    fn network_errors_become_transient() {
        let err = FetchError::from_api(classroom_api::Error::RequestFailed);
        assert!(matches!(err, FetchError::Transient { .. }));
        assert!(err.to_string().contains("Request failed"));
    }

    #[test]
    fn classroom_error_display() {
        let err = ClassroomError::InvalidInput("page must be >= 1".to_string());
        assert_eq!(err.to_string(), "Invalid input: page must be >= 1");

        let err: ClassroomError = FetchError::TimedOut(Duration::from_secs(2)).into();
        assert!(err.to_string().starts_with("Fetch error: Timed out"));
    }
}
