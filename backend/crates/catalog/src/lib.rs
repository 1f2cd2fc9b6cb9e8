//! Catalog Backend Module - Products & Favorites
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, filters, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Contract
//! - Product listing/lookup is public; mutations require a bearer caller
//! - Every mutation is ownership-filtered in a single statement
//!   (`id AND user_id`), so there is no check/use gap
//! - Favorites are unique per (user, product) at the store level; the
//!   conflict surfaces as the contract's 400 "already favorited"

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{favorites_router, products_router};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::favorite::*;
    pub use crate::domain::entity::product::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
