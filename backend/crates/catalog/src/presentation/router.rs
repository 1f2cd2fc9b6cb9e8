//! Products & Favorites Routers

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use auth::domain::provider::IdentityProvider;
use auth::presentation::middleware::{AuthMiddlewareState, require_auth};

use crate::domain::repository::{FavoriteRepository, ProductRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Products router with the PostgreSQL repository
pub fn products_router<P>(repo: PgCatalogRepository, auth: AuthMiddlewareState<P>) -> Router
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    products_router_generic(repo, auth)
}

/// Create a generic Products router for any repository implementation.
///
/// Listing and lookups are public; mutations go through the bearer
/// middleware.
pub fn products_router_generic<R, P>(repo: R, auth: AuthMiddlewareState<P>) -> Router
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    let protected = Router::new()
        .route("/", post(handlers::create_product::<R>))
        .route(
            "/{id}",
            put(handlers::update_product::<R>).delete(handlers::delete_product::<R>),
        )
        .route_layer(middleware::from_fn(move |req, next| {
            require_auth(auth.clone(), req, next)
        }))
        .with_state(state.clone());

    Router::new()
        .route("/", get(handlers::list_products::<R>))
        .route("/user/{user_id}", get(handlers::get_user_products::<R>))
        .route("/{id}", get(handlers::get_product::<R>))
        .with_state(state)
        .merge(protected)
}

/// Create the Favorites router with the PostgreSQL repository
pub fn favorites_router<P>(repo: PgCatalogRepository, auth: AuthMiddlewareState<P>) -> Router
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    favorites_router_generic(repo, auth)
}

/// Create a generic Favorites router; every route requires authentication
pub fn favorites_router_generic<R, P>(repo: R, auth: AuthMiddlewareState<P>) -> Router
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::list_favorites::<R>))
        .route("/", post(handlers::add_favorite::<R>))
        .route("/{product_id}", delete(handlers::remove_favorite::<R>))
        .route("/check/{product_id}", get(handlers::check_favorite::<R>))
        .route_layer(middleware::from_fn(move |req, next| {
            require_auth(auth.clone(), req, next)
        }))
        .with_state(state)
}
