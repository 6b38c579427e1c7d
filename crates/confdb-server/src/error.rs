use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use confdb_namespace::NamespaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("namespace error: {0}")]
    Namespace(#[from] NamespaceError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status reported to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Namespace(NamespaceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Namespace(NamespaceError::InvalidPath { .. }) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::debug!("request rejected: {self}");
        }
        let reason = status.canonical_reason().unwrap_or_default();
        (status, reason).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
