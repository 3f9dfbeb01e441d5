//! Authentication routes: register, login, me.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use notes_core::Account;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::{CurrentUser, JsonBody};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: Account,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Json<Account>> {
    let account = state
        .identity()
        .register(&request.email, &request.name, &request.password)
        .await?;
    Ok(Json(account))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = state
        .identity()
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        user: session.account,
        token: session.token.token,
        expires_at: session.token.expires_at,
    }))
}

/// GET /auth/me
async fn me(State(state): State<AppState>, CurrentUser(viewer): CurrentUser) -> ApiResult<Json<Account>> {
    let account = state.identity().current_account(viewer.account_id).await?;
    Ok(Json(account))
}

/// Build authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}
