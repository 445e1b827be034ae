//! Error types for menagerie_server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use menagerie_core::{DbError, RepoError};
use thiserror::Error;

use crate::form::FormError;

/// Result type alias for request handling
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors that terminate a request with a non-success response
#[derive(Error, Debug)]
pub enum ServerError {
    /// Store operation failed
    #[error("store error: {0}")]
    Store(#[from] RepoError),

    /// Submitted form could not be coerced into typed fields
    #[error("invalid form: {0}")]
    Form(#[from] FormError),

    /// Template rendering failed
    #[error("render error: {0}")]
    Render(#[from] askama::Error),

    /// Blocking store task panicked or was cancelled
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(RepoError::Db(DbError::Unavailable(_))) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(RepoError::Validation(_)) | Self::Form(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Render(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=request_failed module=server status=error http_status={} error={}",
                status.as_u16(),
                self
            );
            // Store internals stay in the log.
            let reason = status.canonical_reason().unwrap_or("error");
            return (status, reason.to_string()).into_response();
        }
        (status, self.to_string()).into_response()
    }
}
