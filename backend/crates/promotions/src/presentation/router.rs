//! Promotions Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use auth::domain::provider::IdentityProvider;
use auth::presentation::middleware::{AuthMiddlewareState, require_auth};

use crate::domain::repository::PromotionRepository;
use crate::infra::postgres::PgPromotionRepository;
use crate::presentation::handlers::{self, PromotionAppState};

/// Create the Promotions router with the PostgreSQL repository
pub fn promotions_router<P>(repo: PgPromotionRepository, auth: AuthMiddlewareState<P>) -> Router
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    promotions_router_generic(repo, auth)
}

/// Create a generic Promotions router for any repository implementation.
///
/// CRUD requires the bearer middleware; impression/click tracking is public
/// so promoted listings can report traffic from anonymous visitors.
pub fn promotions_router_generic<R, P>(repo: R, auth: AuthMiddlewareState<P>) -> Router
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let state = PromotionAppState {
        repo: Arc::new(repo),
    };

    let protected = Router::new()
        .route(
            "/",
            get(handlers::list_promotions::<R>).post(handlers::create_promotion::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_promotion::<R>)
                .put(handlers::update_promotion::<R>)
                .delete(handlers::delete_promotion::<R>),
        )
        .route_layer(middleware::from_fn(move |req, next| {
            require_auth(auth.clone(), req, next)
        }))
        .with_state(state.clone());

    Router::new()
        .route("/{id}/impression", post(handlers::track_impression::<R>))
        .route("/{id}/click", post(handlers::track_click::<R>))
        .with_state(state)
        .merge(protected)
}
