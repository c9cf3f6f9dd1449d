//! API error types

use thiserror::Error;

/// Errors from the task service API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Check if this is a 4xx response from the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a 5xx response from the service
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_client_error() {
        let err = ApiError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_is_server_error() {
        let err = ApiError::Status {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Service error 500: boom");
    }
}
