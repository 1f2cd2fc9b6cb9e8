//! Promotion Error Types
//!
//! Promotion-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Promotion-specific result type alias
pub type PromotionResult<T> = Result<T, PromotionError>;

/// Promotion-specific error variants
#[derive(Debug, Error)]
pub enum PromotionError {
    /// Create without the full required field set
    #[error("Product ID, title, budget, start date, and end date are required")]
    MissingFields,

    /// Input failed validation (message is client-facing)
    #[error("{0}")]
    Validation(String),

    /// Status outside {active, paused, completed}
    #[error("Invalid promotion status")]
    InvalidStatus,

    /// No such promotion for this owner
    #[error("Promotion not found")]
    PromotionNotFound,

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

impl PromotionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PromotionError::MissingFields
            | PromotionError::Validation(_)
            | PromotionError::InvalidStatus
            | PromotionError::NoRowMatched
            | PromotionError::Store(_) => StatusCode::BAD_REQUEST,
            PromotionError::PromotionNotFound => StatusCode::NOT_FOUND,
            PromotionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromotionError::MissingFields
            | PromotionError::Validation(_)
            | PromotionError::InvalidStatus
            | PromotionError::NoRowMatched
            | PromotionError::Store(_) => ErrorKind::BadRequest,
            PromotionError::PromotionNotFound => ErrorKind::NotFound,
            PromotionError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PromotionError::Store(msg) => {
                tracing::error!(message = %msg, "Promotion store error");
            }
            PromotionError::Internal(msg) => {
                tracing::error!(message = %msg, "Promotion internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Promotion error");
            }
        }
    }
}

impl IntoResponse for PromotionError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for PromotionError {
    fn from(err: sqlx::Error) -> Self {
        let mapped = AppError::from(err);
        tracing::error!(error = ?mapped, "Promotion database error");
        PromotionError::Store(mapped.message().to_string())
    }
}
