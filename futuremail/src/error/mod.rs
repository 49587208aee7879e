//! Error types at the HTTP edge
//!
//! Domain modules carry their own `thiserror` enums; handlers convert them into
//! [`FutureMailError`], which maps each kind onto a status code and a plain
//! text body short enough to show in a toast.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::picker::PickerError;
use crate::richtext::EditorError;

/// Handler error type
#[derive(Debug, Error)]
pub enum FutureMailError {
    /// No composer with this id (never mounted or swept)
    #[error("This form has expired, please reload the page.")]
    ComposerNotFound(Uuid),

    /// Malformed request parameter
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rejected picker event
    #[error(transparent)]
    Picker(#[from] PickerError),

    /// Rejected editor event
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Another submission is running
    #[error("{0}")]
    Conflict(String),

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl FutureMailError {
    /// Status code sent for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ComposerNotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Picker(_) | Self::Editor(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FutureMailError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            return (status, "Something went wrong, please try again.").into_response();
        }
        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        (status, self.to_string()).into_response()
    }
}
