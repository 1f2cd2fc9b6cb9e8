//! Auth (Authentication Gateway) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, provider/repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Identity-provider HTTP client and database implementation
//! - `presentation/` - HTTP handlers, DTOs, middleware, routers
//!
//! ## Responsibilities
//! - Register/login/logout/me, delegating credentials and token issuance to
//!   the external identity provider (GoTrue-compatible REST dialect)
//! - Profile-row provisioning on signup (`users` table)
//! - User profile endpoints (public lookup, own-row profile and plan updates)
//! - Bearer-token middleware attaching the resolved caller to the request
//!
//! ## Contract
//! - Tokens are opaque bearer credentials validated upstream per request
//! - No session refresh, rotation or rate limiting lives here

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{AuthError, AuthResult};
pub use infra::http::HttpIdentityProvider;
pub use infra::postgres::PgProfileRepository;
pub use presentation::middleware::{AuthMiddlewareState, CurrentUser};
pub use presentation::router::{auth_router, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::identity::*;
    pub use crate::domain::entity::user_profile::*;
    pub use crate::domain::value_object::email::*;
    pub use crate::domain::value_object::subscription_plan::*;
    pub use crate::domain::value_object::username::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
