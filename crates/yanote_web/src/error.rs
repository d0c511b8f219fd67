//! HTTP error mapping.
//!
//! # Responsibility
//! - Turn core errors into responses: 404 for notes the requester cannot
//!   see, 200 with the form document for input errors, 500 otherwise.
//!
//! # Invariants
//! - The 404 body never reveals whether the slug exists.
//! - 500 bodies are generic; the detail only goes to the log.

use crate::handlers::forms::FormDocument;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};
use yanote_core::{NoteInput, NoteServiceError, RepoError, UserServiceError};

#[derive(Debug)]
pub enum WebError {
    /// No note visible to the requester under this slug.
    NotFound,
    /// Submitted form rejected; re-rendered with field errors.
    Form(FormDocument),
    /// Storage or runtime failure.
    Internal(String),
}

impl WebError {
    /// Maps a create/update failure, keeping the submitted input for the
    /// re-rendered form.
    pub fn from_submission(err: NoteServiceError, input: NoteInput) -> Self {
        match err.field_error() {
            Some((field, message)) => {
                Self::Form(FormDocument::from_input(input).with_error(field, message))
            }
            None => err.into(),
        }
    }
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Form(_) => write!(f, "form rejected"),
            Self::Internal(detail) => write!(f, "internal error: {detail}"),
        }
    }
}

impl Error for WebError {}

impl From<NoteServiceError> for WebError {
    fn from(value: NoteServiceError) -> Self {
        match value {
            NoteServiceError::NotFound(_) => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<UserServiceError> for WebError {
    fn from(value: UserServiceError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<RepoError> for WebError {
    fn from(value: RepoError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Not found." })),
            )
                .into_response(),
            Self::Form(form) => (StatusCode::OK, Json(json!({ "form": form }))).into_response(),
            Self::Internal(detail) => {
                error!("event=request_failed module=web status=error detail={detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error." })),
                )
                    .into_response()
            }
        }
    }
}
