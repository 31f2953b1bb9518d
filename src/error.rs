//! Error types and HTTP status mapping for the gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::weather::NormalizeError;

/// Top-level error type for request handling
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A required query parameter is missing or malformed
    #[error("Missing or invalid parameter: {name}")]
    MissingParameter { name: &'static str },

    /// A required provider credential is not configured
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An upstream provider could not be reached after retries
    #[error("Upstream error: {source}")]
    Upstream {
        #[from]
        source: FetchError,
    },

    /// The primary weather payload lacked a mandatory field
    #[error("Normalization error: {source}")]
    Normalize {
        #[from]
        source: NormalizeError,
    },
}

impl GatewayError {
    pub fn missing_parameter(name: &'static str) -> Self {
        Self::MissingParameter { name }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Config { .. }
            | GatewayError::Upstream { .. }
            | GatewayError::Normalize { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = %status, "request failed: {}", self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_is_bad_request() {
        let err = GatewayError::missing_parameter("lat");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("lat"));
    }

    #[test]
    fn test_config_error_is_internal() {
        let err = GatewayError::config("OPENWEATHERMAP_API_KEY not set");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("OPENWEATHERMAP_API_KEY"));
    }

    #[test]
    fn test_unauthorized_upstream_is_internal() {
        let err: GatewayError = FetchError::Unauthorized {
            url: "https://example.invalid".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
