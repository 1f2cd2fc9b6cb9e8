//! Auth & Users Routers

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::domain::provider::IdentityProvider;
use crate::domain::repository::ProfileRepository;
use crate::infra::http::HttpIdentityProvider;
use crate::infra::postgres::PgProfileRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the Auth router with the HTTP identity provider and PostgreSQL repository
pub fn auth_router(provider: HttpIdentityProvider, repo: PgProfileRepository) -> Router {
    auth_router_generic(provider, repo)
}

/// Create a generic Auth router for any provider/repository implementation
pub fn auth_router_generic<P, R>(provider: P, repo: R) -> Router
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        provider: Arc::new(provider),
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/register", post(handlers::register::<P, R>))
        .route("/login", post(handlers::login::<P, R>))
        .route("/logout", post(handlers::logout::<P, R>))
        .route("/me", get(handlers::me::<P, R>))
        .with_state(state)
}

/// Create the Users router with the HTTP identity provider and PostgreSQL repository
pub fn users_router(provider: HttpIdentityProvider, repo: PgProfileRepository) -> Router {
    users_router_generic(provider, repo)
}

/// Create a generic Users router for any provider/repository implementation.
///
/// `GET /{user_id}` is public; the profile/subscription updates go through
/// the bearer middleware.
pub fn users_router_generic<P, R>(provider: P, repo: R) -> Router
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        provider: Arc::new(provider),
        repo: Arc::new(repo),
    };

    let auth = AuthMiddlewareState {
        provider: state.provider.clone(),
    };

    let protected = Router::new()
        .route("/profile", put(handlers::update_user_profile::<P, R>))
        .route("/subscription", put(handlers::update_subscription::<P, R>))
        .route_layer(middleware::from_fn(move |req, next| {
            require_auth(auth.clone(), req, next)
        }))
        .with_state(state.clone());

    Router::new()
        .route("/{user_id}", get(handlers::get_user_profile::<P, R>))
        .with_state(state)
        .merge(protected)
}
