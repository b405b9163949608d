use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("network failure: {message}")]
    Network { message: String, timed_out: bool },

    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("could not parse completion: {0}")]
    MalformedCompletion(String),

    #[error("missing or empty field: {0}")]
    MissingField(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("no completion service credentials configured")]
    MissingCredentials,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn timeout(what: &str) -> Self {
        AppError::Network {
            message: format!("{} timed out", what),
            timed_out: true,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Network { timed_out: true, .. } => StatusCode::REQUEST_TIMEOUT,
            AppError::Network { .. }
            | AppError::UpstreamStatus { .. }
            | AppError::MalformedCompletion(_)
            | AppError::MissingField(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return AppError::UpstreamStatus {
                status: status.as_u16(),
                body: err.to_string(),
            };
        }
        AppError::Network {
            message: err.to_string(),
            timed_out: err.is_timeout(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Network { timed_out: true, .. } => {
                "Request timeout - URL took too long to respond".to_string()
            }
            AppError::Network { .. } | AppError::UpstreamStatus { .. } => {
                "Unable to access the provided URL".to_string()
            }
            _ => "Internal server error".to_string(),
        };
        tracing::debug!("Responding {} for error: {}", status, self);
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
