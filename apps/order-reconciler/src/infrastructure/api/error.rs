//! Central-adapter error types.

use thiserror::Error;

use crate::application::ports::ApiError;

/// Errors from the Central HTTP adapter.
#[derive(Debug, Error, Clone)]
pub enum CentralError {
    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Transport failure (connection refused, timeout).
    #[error("network error for {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error details.
        message: String,
    },

    /// Non-2xx status returned.
    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("JSON parsing error for {url}: {message}")]
    JsonParse {
        /// Requested URL.
        url: String,
        /// Error details.
        message: String,
    },

    /// Response parsed but an expected field was absent.
    #[error("missing field {field} in response from {url}")]
    MissingField {
        /// Requested URL.
        url: String,
        /// Dotted path of the absent field.
        field: &'static str,
    },
}

impl From<CentralError> for ApiError {
    fn from(err: CentralError) -> Self {
        match err {
            CentralError::Client(message) | CentralError::Network { message, .. } => {
                Self::Transport { message }
            }
            CentralError::Status { status, body, .. } => Self::Status { status, body },
            CentralError::JsonParse { message, .. } => Self::Parse { message },
            CentralError::MissingField { field, .. } => Self::MissingField { field },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_maps_to_transport() {
        let err = CentralError::Network {
            url: "http://x".to_string(),
            message: "connection refused".to_string(),
        };
        let api_err: ApiError = err.into();
        assert!(matches!(api_err, ApiError::Transport { .. }));
    }

    #[test]
    fn status_preserves_code() {
        let err = CentralError::Status {
            url: "http://x".to_string(),
            status: 404,
            body: "not found".to_string(),
        };
        let api_err: ApiError = err.into();
        assert!(matches!(api_err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn json_parse_maps_to_parse() {
        let err = CentralError::JsonParse {
            url: "http://x".to_string(),
            message: "expected value".to_string(),
        };
        let api_err: ApiError = err.into();
        assert!(matches!(api_err, ApiError::Parse { .. }));
    }

    #[test]
    fn missing_field_preserves_field() {
        let err = CentralError::MissingField {
            url: "http://x".to_string(),
            field: "token",
        };
        let api_err: ApiError = err.into();
        assert!(matches!(api_err, ApiError::MissingField { field: "token" }));
    }
}
