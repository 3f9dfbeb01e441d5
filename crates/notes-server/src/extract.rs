//! Request extractors.
//!
//! Caller identity comes from `Authorization: Bearer <token>`, and two
//! gates share the same decoding:
//! - [`CurrentUser`] rejects the request with 401 when the credential is
//!   missing, malformed, badly signed or expired.
//! - [`MaybeUser`] treats any of those as an anonymous caller.
//!
//! [`JsonBody`] and [`QueryParams`] wrap axum's extractors so malformed
//! input is reported through [`ApiError`] like every other failure.

use axum::{
    extract::{FromRequest, FromRequestParts, Query},
    http::{header, request::Parts},
};
use notes_core::Viewer;

use crate::error::ApiError;
use crate::state::AppState;

/// JSON request body; parse failures become a 400 `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Query string; parse failures become a 400 `ApiError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// An authenticated caller. Rejects the request otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Viewer);

/// A caller who may or may not be authenticated.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Viewer>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.tokens().verify(token).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            ApiError::from(e)
        })?;
        Ok(Self(claims.viewer()))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let viewer = bearer_token(parts)
            .ok()
            .and_then(|token| state.tokens().verify(token).ok())
            .map(|claims| claims.viewer());
        Ok(Self(viewer))
    }
}

/// Pull the raw token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".into()))?;

    let value = header.to_str().map_err(|_| {
        ApiError::Unauthorized("Authorization header contains invalid characters".into())
    })?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("expected Authorization: Bearer <token>".into()))?;

    Ok(token)
}
