//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Client-visible bodies are always
//! `{"error": "<message>"}`; persistence failures surface as 400 with the
//! store's mapped message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Register/login called without email or password
    #[error("Email and password are required")]
    MissingCredentials,

    /// Input failed validation (message is client-facing)
    #[error("{0}")]
    Validation(String),

    /// No bearer token on a route that requires one
    #[error("No authorization token provided")]
    TokenMissing,

    /// Bearer token rejected by the identity provider
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Wrong email/password on login
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Identity provider rejected the request (message passed through)
    #[error("{0}")]
    Provider(String),

    /// Identity provider unreachable
    #[error("Identity provider unavailable")]
    ProviderUnavailable,

    /// No profile row for the requested user
    #[error("User not found")]
    ProfileNotFound,

    /// Subscription plan outside {free, premium, business}
    #[error("Invalid subscription plan")]
    InvalidPlan,

    /// Ownership-filtered update matched zero rows; surfaced as the
    /// generic store error, not a distinct forbidden/not-found
    #[error("Record not found")]
    NoRowMatched,

    /// Persistence failure, surfaced to the client as 400
    #[error("{0}")]
    Store(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials
            | AuthError::Validation(_)
            | AuthError::Provider(_)
            | AuthError::InvalidPlan
            | AuthError::NoRowMatched
            | AuthError::Store(_) => StatusCode::BAD_REQUEST,
            AuthError::TokenMissing | AuthError::TokenInvalid | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::ProfileNotFound => StatusCode::NOT_FOUND,
            AuthError::ProviderUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials
            | AuthError::Validation(_)
            | AuthError::Provider(_)
            | AuthError::InvalidPlan
            | AuthError::NoRowMatched
            | AuthError::Store(_) => ErrorKind::BadRequest,
            AuthError::TokenMissing | AuthError::TokenInvalid | AuthError::InvalidCredentials => {
                ErrorKind::Unauthorized
            }
            AuthError::ProfileNotFound => ErrorKind::NotFound,
            AuthError::ProviderUnavailable => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Store(msg) => {
                tracing::error!(message = %msg, "Auth store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::ProviderUnavailable => {
                tracing::error!("Identity provider unreachable");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
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
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        // Reuse the kernel's message mapping, then surface as a 400-class
        // store error; detail stays in the log, not the response.
        let mapped = AppError::from(err);
        tracing::error!(error = ?mapped, "Auth database error");
        AuthError::Store(mapped.message().to_string())
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
