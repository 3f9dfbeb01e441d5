//! Note CRUD routes. Every route here requires a bearer credential.

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post, put},
};
use notes_core::{Note, NoteId, NoteSummary};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentUser, JsonBody, QueryParams};
use crate::services::NoteInput;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub public: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub public: bool,
}

/// `?id=` query for single-note routes.
#[derive(Debug, Deserialize)]
pub struct NoteIdQuery {
    pub id: String,
}

/// Acknowledgement body for operations with nothing else to return.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl StatusResponse {
    pub fn success(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
        }
    }
}

/// Parse a note id supplied by the client.
pub(crate) fn parse_note_id(raw: &str) -> ApiResult<NoteId> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid note id: {:?}", raw)))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /notes/create-note
async fn create_note(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    JsonBody(request): JsonBody<CreateNoteRequest>,
) -> ApiResult<Json<Note>> {
    let note = state
        .notes()
        .create(
            viewer.account_id,
            NoteInput {
                title: request.title,
                content: request.content,
                public: request.public,
            },
        )
        .await?;
    Ok(Json(note))
}

/// GET /notes/get-notes
async fn list_notes(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
) -> ApiResult<Json<Vec<NoteSummary>>> {
    Ok(Json(state.notes().list(viewer.account_id).await?))
}

/// GET /notes/get-note?id=
async fn get_note(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    QueryParams(query): QueryParams<NoteIdQuery>,
) -> ApiResult<Json<Note>> {
    let id = parse_note_id(&query.id)?;
    Ok(Json(state.notes().get(id, viewer.account_id).await?))
}

/// PUT /notes/update
async fn update_note(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    JsonBody(request): JsonBody<UpdateNoteRequest>,
) -> ApiResult<Json<NoteSummary>> {
    let id = parse_note_id(&request.id)?;
    let summary = state
        .notes()
        .update(
            id,
            viewer.account_id,
            NoteInput {
                title: request.title,
                content: request.content,
                public: request.public,
            },
        )
        .await?;
    Ok(Json(summary))
}

/// DELETE /notes/delete?id=
async fn delete_note(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    QueryParams(query): QueryParams<NoteIdQuery>,
) -> ApiResult<Json<StatusResponse>> {
    let id = parse_note_id(&query.id)?;
    state.notes().delete(id, viewer.account_id).await?;
    Ok(Json(StatusResponse::success("note deleted successfully")))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes/create-note", post(create_note))
        .route("/notes/get-notes", get(list_notes))
        .route("/notes/get-note", get(get_note))
        .route("/notes/update", put(update_note))
        .route("/notes/delete", delete(delete_note))
}
