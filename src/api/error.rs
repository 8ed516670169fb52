//! API Error Types
//!
//! Errors raised while talking to the analytics backend. They are `Clone`
//! so a failure can be held in query and mutation state and shown to more
//! than one view.

use thiserror::Error;

/// Errors from the analytics backend client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Backend could not be reached (connection refused, DNS failure)
    #[error("Analytics service unavailable")]
    Unavailable,

    /// Transport-level failure other than an unreachable host
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Body was not the JSON shape we expected
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Body decoded but its values are out of range
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status code, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Unavailable | ApiError::Network(_) => true,
            ApiError::Http { status, .. } => *status >= 500 || *status == 429,
            ApiError::Decode(_) | ApiError::InvalidResponse(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return ApiError::Unavailable;
        }
        if let Some(status) = err.status() {
            return ApiError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        ApiError::Network(err.to_string())
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;
