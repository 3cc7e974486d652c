//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::repository::StoreError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input field
    #[error("{0}")]
    Validation(String),

    /// Identifier already registered
    #[error("Credentials taken")]
    CredentialsTaken,

    /// Unknown identifier or wrong password (indistinguishable on purpose)
    #[error("Credentials incorrect")]
    InvalidCredentials,

    /// Missing, malformed, expired or tampered bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Account store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::CredentialsTaken | AuthError::InvalidCredentials => StatusCode::FORBIDDEN,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Storage(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::CredentialsTaken | AuthError::InvalidCredentials => ErrorKind::Forbidden,
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs; clients get a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Storage(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::Unauthorized => AppError::unauthorized("Unauthorized")
                .with_action("Sign in and send the access token as a Bearer token"),
            AuthError::InvalidCredentials => AppError::forbidden("Credentials incorrect"),
            AuthError::CredentialsTaken => AppError::forbidden("Credentials taken"),
            AuthError::Validation(msg) => AppError::bad_request(msg.clone()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Account store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign in attempt");
            }
            AuthError::CredentialsTaken => {
                tracing::info!("Sign up with an identifier already taken");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let unauthorized = matches!(self, AuthError::Unauthorized);
        let mut response = self.to_app_error().into_response();
        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        // Every body failure is a client error; axum alone would answer 415/422 for some.
        AuthError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::CredentialsTaken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_matches_status() {
        for err in [
            AuthError::Validation("x".into()),
            AuthError::CredentialsTaken,
            AuthError::InvalidCredentials,
            AuthError::Unauthorized,
            AuthError::Internal("boom".into()),
        ] {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16());
        }
    }

    #[test]
    fn test_internal_details_hidden() {
        let app = AuthError::Internal("pool exhausted on db-3".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    #[tokio::test]
    async fn test_unauthorized_challenge_header() {
        let response = AuthError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
