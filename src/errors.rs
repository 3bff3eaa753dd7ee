use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures reported by the timestamp store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("store is not initialized")]
    NotInitialized,

    #[error("store should not set an absent timestamp")]
    InvalidInput,
}

/// Failures surfaced by the HTTP layer. Each maps to one status code and a
/// plain-text body carrying the error text.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("could not decode request body: {0}")]
    Decode(String),

    #[error("method {0} is not allowed on this route")]
    MethodNotAllowed(Method),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(StoreError::InvalidInput) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotInitialized) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config.json not found in any of: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
