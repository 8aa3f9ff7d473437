use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid bind address: {0}")]
    BindAddrError(#[from] std::net::AddrParseError),

    #[error("Configuration error: {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid query parameter {field}: {reason}")]
    InvalidQueryError { field: String, reason: String },
}

impl ApiError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ApiError::InvalidQueryError { field, reason } => {
                format!("Parameter '{}' is invalid: {}", field, reason)
            }
            ApiError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            ApiError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' failed validation: {}", field, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ApiError::BindAddrError(_) => "Check the --bind value (e.g. 127.0.0.1:8000)",
            ApiError::ConfigValidationError { .. } | ApiError::InvalidConfigValueError { .. } => {
                "Check the CLI flags and the TOML config file"
            }
            ApiError::InvalidQueryError { .. } => {
                "Check the query string (lat in [-90,90], lon in [-180,180])"
            }
            _ => "See the log output for details",
        }
    }
}

/// Query validation failures are the client's fault; everything else that
/// escapes a handler is a server error.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidQueryError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({
            "error": self.user_friendly_message(),
        }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
