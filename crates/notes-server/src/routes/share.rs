//! Sharing routes:
//! - POST /notes/share-slug - Grant an email read access
//! - DELETE /notes/revoke-access - Remove an email's grant
//! - GET /notes/public - Read a note by slug, signed in or not

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post},
};
use notes_core::Note;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::{CurrentUser, JsonBody, MaybeUser, QueryParams};
use crate::routes::notes::{StatusResponse, parse_note_id};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// What the grantee passes to `GET /notes/public?q=`.
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct RevokeQuery {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PublicQuery {
    pub q: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /notes/share-slug
async fn share_note(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    JsonBody(request): JsonBody<ShareRequest>,
) -> ApiResult<Json<ShareResponse>> {
    let id = parse_note_id(&request.id)?;
    let slug = state
        .notes()
        .share_via_email(id, viewer.account_id, &request.email)
        .await?;

    Ok(Json(ShareResponse {
        status: "success",
        message: "note shared successfully",
        slug,
    }))
}

/// DELETE /notes/revoke-access?email=&id=
async fn revoke_access(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    QueryParams(query): QueryParams<RevokeQuery>,
) -> ApiResult<Json<StatusResponse>> {
    let id = parse_note_id(&query.id)?;
    state
        .notes()
        .revoke_email_share(id, viewer.account_id, &query.email)
        .await?;
    Ok(Json(StatusResponse::success("note access removed successfully")))
}

/// GET /notes/public?q=<slug>
async fn public_note(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    QueryParams(query): QueryParams<PublicQuery>,
) -> ApiResult<Json<Note>> {
    let note = state
        .notes()
        .get_public_by_slug(&query.q, viewer.as_ref())
        .await?;
    Ok(Json(note))
}

/// Build sharing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes/share-slug", post(share_note))
        .route("/notes/revoke-access", delete(revoke_access))
        .route("/notes/public", get(public_note))
}
