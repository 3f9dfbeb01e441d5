//! API error types with JSON responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_store::StoreError;
use serde::Serialize;

use crate::auth::AuthError;
use crate::services::{IdentityError, NoteError};

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("{0}")]
    BadRequest(String),

    /// Unauthorized (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Forbidden (403).
    #[error("{0}")]
    Forbidden(String),

    /// Not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Conflict (409).
    #[error("{0}")]
    Conflict(String),

    /// Internal server error (500). The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Store(e) if e.is_conflict() => "CONFLICT",
            Self::Store(_) => "STORAGE_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) if e.is_conflict() => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller.
    fn public_message(&self) -> String {
        match self {
            Self::Store(e) if e.is_conflict() => e.to_string(),
            Self::Internal(_) | Self::Store(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidEmail | IdentityError::WeakPassword => {
                Self::BadRequest(err.to_string())
            }
            IdentityError::EmailExists => Self::Conflict(err.to_string()),
            IdentityError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            IdentityError::NotFound => Self::NotFound(err.to_string()),
            IdentityError::Store(e) => Self::Store(e),
            IdentityError::Auth(_) | IdentityError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::EmptyTitle
            | NoteError::EmptyContent
            | NoteError::MissingOwner
            | NoteError::MissingEmail
            | NoteError::InvalidEmail => Self::BadRequest(err.to_string()),
            NoteError::NotFound => Self::NotFound(err.to_string()),
            NoteError::Unauthorized => Self::Forbidden(err.to_string()),
            NoteError::Store(e) => Self::Store(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken(_) => Self::Unauthorized("invalid or expired token".to_string()),
            AuthError::Signing(_) | AuthError::ExpiryOutOfRange | AuthError::Hashing(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.public_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_errors_map_to_statuses() {
        let cases = [
            (NoteError::EmptyTitle, StatusCode::BAD_REQUEST),
            (NoteError::InvalidEmail, StatusCode::BAD_REQUEST),
            (NoteError::NotFound, StatusCode::NOT_FOUND),
            (NoteError::Unauthorized, StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_identity_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(IdentityError::WeakPassword).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(IdentityError::EmailExists).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(IdentityError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_slug_collision_is_conflict() {
        let err = ApiError::from(NoteError::Store(StoreError::DuplicateSlug("a-123456".into())));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "CONFLICT");
    }

    #[test]
    fn test_storage_detail_is_hidden() {
        let err = ApiError::Store(StoreError::ConfigError("postgres://user:secret@db".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "internal server error");
    }
}
