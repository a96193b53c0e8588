use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use cask_gateway::GatewayError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("key must not be empty")]
    EmptyKey,

    #[error("blob not found: {0}")]
    NotFound(String),

    /// The request payload could not be read at the transport boundary
    /// (missing `file` field, truncated multipart stream). Produced here,
    /// before the gateway is involved.
    #[error("malformed upload: {0}")]
    MalformedUpload(String),

    #[error("timed out waiting for lock on key: {0}")]
    Timeout(String),

    /// Backend failure, message carried verbatim from the store.
    #[error("{0}")]
    Backend(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Gateway errors map one-to-one; nothing is re-wrapped or re-worded.
impl From<GatewayError> for ServerError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::EmptyKey => Self::EmptyKey,
            GatewayError::NotFound { key } => Self::NotFound(key),
            GatewayError::Backend { detail } => Self::Backend(detail),
            GatewayError::Timeout { key } => Self::Timeout(key),
        }
    }
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::EmptyKey | Self::MalformedUpload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Backend(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
