use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{auth::AuthError, service::ServiceError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON format")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("Authentication required")]
    MissingCredentials,

    #[error("Invalid token")]
    InvalidToken(#[source] AuthError),

    #[error("{0}")]
    AddNote(#[source] ServiceError),

    #[error("Failed to get notes")]
    GetNotes(#[source] ServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MalformedPayload(_) | Self::GetNotes(_) => StatusCode::BAD_REQUEST,
            Self::MissingCredentials | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::AddNote(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
