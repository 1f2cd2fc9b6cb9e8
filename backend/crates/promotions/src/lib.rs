//! Promotions Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, status value object, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Contract
//! - All promotion CRUD is scoped to the authenticated owner
//! - Impression/click tracking is public and increments counters through a
//!   single atomic UPDATE statement; counters are never settable via PUT

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{PromotionError, PromotionResult};
pub use infra::postgres::PgPromotionRepository;
pub use presentation::router::promotions_router;

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::promotion::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
