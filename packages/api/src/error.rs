//! Error types for the persistence client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, unreadable body
    #[error("{operation} request failed: {source}")]
    Http {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("{operation} failed: HTTP {status}")]
    Status { operation: &'static str, status: u16 },

    /// `{"success": false}` from the endpoint
    #[error("{message}")]
    Rejected { message: String },

    /// 2xx response whose body is not the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No ajax URL configured")]
    NotConfigured,
}

impl ApiError {
    /// HTTP status behind the failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
