use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use crate::{
    auth::Owner,
    dto::{CreateNoteRequest, NoteResponse},
    error::AppError,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(add_note, get_notes),
    components(schemas(NoteResponse, CreateNoteRequest)),
    tags(
        (name = "notes", description = "Spell-checked notes API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/add-note",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Spelling errors found or internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn add_note(State(state): State<AppState>, Owner(owner): Owner, body: Bytes) -> Response {
    // Decoded by hand so that every malformed body maps to 400.
    let payload: CreateNoteRequest = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("rejecting malformed note payload: {}", e);
            return AppError::MalformedPayload(e).into_response();
        }
    };

    match state.notes.add_note(&payload.content, &owner).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(NoteResponse {
                id,
                content: payload.content,
                owner,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            AppError::AddNote(e).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/get-notes",
    responses(
        (status = 200, description = "Notes of the caller", body = Vec<NoteResponse>),
        (status = 400, description = "Notes could not be loaded"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_notes(State(state): State<AppState>, Owner(owner): Owner) -> Response {
    match state.notes.get_notes(&owner).await {
        Ok(notes) => (
            StatusCode::OK,
            Json(
                notes
                    .into_iter()
                    .map(NoteResponse::from)
                    .collect::<Vec<_>>(),
            ),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to get note entries: {}", e);
            AppError::GetNotes(e).into_response()
        }
    }
}
