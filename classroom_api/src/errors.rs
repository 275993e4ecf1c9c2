//! Error types for the request pipeline.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent or its body could not be read
    /// (network error, timeout, or client construction failure).
    #[error("Request failed")]
    RequestFailed,
    /// The base URL or request path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(String),
    /// The API answered 401. The session has already been logged out when
    /// this error is returned.
    #[error("Unauthorized")]
    Unauthorized { body: String },
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A success response whose body did not match the expected shape.
    #[error("Failed to parse response: {message}")]
    Deserialize { message: String, body: String },
}

impl Error {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized { .. } => Some(401),
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }

    /// Response body snippet, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Unauthorized { body }
            | Error::HttpStatus { body, .. }
            | Error::Deserialize { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}
