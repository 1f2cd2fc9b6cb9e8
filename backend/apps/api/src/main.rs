//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError` and render as `{"error": "<message>"}`.

use auth::{HttpIdentityProvider, IdentityConfig, PgProfileRepository};
use axum::{
    Json, Router, http,
    http::{Method, header},
    response::IntoResponse,
    routing::get,
};
use catalog::PgCatalogRepository;
use promotions::PgPromotionRepository;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::middleware::AuthMiddlewareState;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,promotions=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Identity provider connection
    let identity_url =
        env::var("IDENTITY_URL").expect("IDENTITY_URL must be set in environment");
    let identity_key = env::var("IDENTITY_SERVICE_KEY").unwrap_or_else(|_| {
        tracing::warn!("IDENTITY_SERVICE_KEY not set, provider calls go out unkeyed");
        String::new()
    });

    let identity_config = IdentityConfig::new(identity_url, identity_key);
    let provider = HttpIdentityProvider::new(&identity_config)?;

    // Repositories
    let profile_repo = PgProfileRepository::new(pool.clone());
    let catalog_repo = PgCatalogRepository::new(pool.clone());
    let promotion_repo = PgPromotionRepository::new(pool.clone());

    // Bearer middleware state shared by the resource routers
    let auth_state = AuthMiddlewareState {
        provider: Arc::new(provider.clone()),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth::auth_router(provider.clone(), profile_repo.clone()),
        )
        .nest("/api/users", auth::users_router(provider, profile_repo))
        .nest(
            "/api/products",
            catalog::products_router(catalog_repo.clone(), auth_state.clone()),
        )
        .nest(
            "/api/favorites",
            catalog::favorites_router(catalog_repo, auth_state.clone()),
        )
        .nest(
            "/api/promotions",
            promotions::promotions_router(promotion_repo, auth_state),
        )
        .route("/health", get(health))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "message": "Kubito API is running"
    }))
}

/// Catch-all for unmatched routes
async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}
