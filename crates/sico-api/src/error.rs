//! Error types for the Sico API client.

use std::fmt;

/// Errors reported by the license backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http { status: u16, message: String },
    /// Authentication failure (401/403).
    Auth { message: String },
    /// Rate limit exceeded.
    RateLimit { retry_after: Option<u64> },
    /// Resource not found.
    NotFound { resource: String },
    /// Backend validation error (400).
    Validation { message: String },
    /// Network/connection error.
    Network { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::Auth { message } => write!(f, "Auth error: {}", message),
            ApiError::RateLimit { retry_after } => match retry_after {
                Some(secs) => write!(f, "Rate limited, retry after {} seconds", secs),
                None => write!(f, "Rate limited"),
            },
            ApiError::NotFound { resource } => write!(f, "Not found: {}", resource),
            ApiError::Validation { message } => write!(f, "Validation error: {}", message),
            ApiError::Network { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Returns true if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::RateLimit { .. } | ApiError::Network { .. })
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::Network { .. } => 3,
            ApiError::RateLimit { .. } => 4,
            _ => 2,
        }
    }
}

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend answered with an error status.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// A product name that is not one of the four product lines.
    #[error("unknown product: {name} (expected sico1010, sico2020, sico5000 or sico6000)")]
    UnknownProduct {
        /// The rejected name.
        name: String,
    },
}

impl Error {
    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(api) => api.exit_code(),
            Error::Http(_) => 3,
            Error::Json(_) | Error::UnknownProduct { .. } => 1,
        }
    }
}

/// Maps a failure to send a request.
///
/// Connection failures and timeouts become [`ApiError::Network`]; anything
/// else stays a plain HTTP error.
pub(crate) fn send_error(error: reqwest::Error) -> Error {
    if error.is_connect() || error.is_timeout() {
        Error::Api(ApiError::Network {
            message: error.to_string(),
        })
    } else {
        Error::Http(error)
    }
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
