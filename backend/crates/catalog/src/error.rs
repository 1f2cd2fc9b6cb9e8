//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Persistence failures surface as 400
//! with the store's mapped message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product create without the required fields
    #[error("Title and image URL are required")]
    MissingProductFields,

    /// Favorite create without a product id
    #[error("Product ID is required")]
    MissingProductId,

    /// Input failed validation (message is client-facing)
    #[error("{0}")]
    Validation(String),

    /// No such product
    #[error("Product not found")]
    ProductNotFound,

    /// (user, product) pair already favorited; unique constraint conflict
    /// surfaced with the contract's message and status
    #[error("Product already favorited")]
    AlreadyFavorited,

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

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::MissingProductFields
            | CatalogError::MissingProductId
            | CatalogError::Validation(_)
            | CatalogError::AlreadyFavorited
            | CatalogError::NoRowMatched
            | CatalogError::Store(_) => StatusCode::BAD_REQUEST,
            CatalogError::ProductNotFound => StatusCode::NOT_FOUND,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::MissingProductFields
            | CatalogError::MissingProductId
            | CatalogError::Validation(_)
            | CatalogError::AlreadyFavorited
            | CatalogError::NoRowMatched
            | CatalogError::Store(_) => ErrorKind::BadRequest,
            CatalogError::ProductNotFound => ErrorKind::NotFound,
            CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Store(msg) => {
                tracing::error!(message = %msg, "Catalog store error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        let mapped = AppError::from(err);
        tracing::error!(error = ?mapped, "Catalog database error");
        CatalogError::Store(mapped.message().to_string())
    }
}
