//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use auth::presentation::middleware::CurrentUser;
use kernel::id::{ProductId, UserId};

use crate::application::{
    CreateProductInput, FavoritesUseCase, ProductListQuery, ProductsUseCase, UpdateProductInput,
};
use crate::domain::repository::{FavoriteRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    AddFavoriteRequest, CheckFavoriteResponse, CreateProductRequest, FavoriteResponse,
    FavoritesResponse, ListProductsQuery, MessageResponse, ProductResponse, ProductsResponse,
    UpdateProductRequest,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// ============================================================================
// Products
// ============================================================================

/// GET /api/products
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    Query(query): Query<ListProductsQuery>,
) -> CatalogResult<Json<ProductsResponse>>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProductsUseCase::new(state.repo.clone());

    let input = ProductListQuery {
        search: query.search,
        category: query.category,
        limit: query.limit,
        offset: query.offset,
    };

    let products = use_case.list(input).await?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/products/{id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProductsUseCase::new(state.repo.clone());

    // A non-UUID path segment can only be an unknown product
    let id = Uuid::parse_str(&id).map_err(|_| CatalogError::ProductNotFound)?;

    let product = use_case.get(ProductId::from_uuid(id)).await?;

    Ok(Json(ProductResponse {
        product: product.into(),
    }))
}

/// GET /api/products/user/{user_id}
pub async fn get_user_products<R>(
    State(state): State<CatalogAppState<R>>,
    Path(user_id): Path<String>,
) -> CatalogResult<Json<ProductsResponse>>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProductsUseCase::new(state.repo.clone());

    let user_id = Uuid::parse_str(&user_id)
        .map_err(|_| CatalogError::Validation("Invalid user ID".to_string()))?;

    let products = use_case.list_by_user(UserId::from_uuid(user_id)).await?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/products (requires authentication)
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateProductRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProductsUseCase::new(state.repo.clone());

    let input = CreateProductInput {
        title: req.title,
        image_url: req.image_url,
        description: req.description,
        category: req.category,
        tags: req.tags,
        store_url: req.store_url,
        price: req.price,
    };

    let product = use_case.create(current.id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            product: product.into(),
        }),
    ))
}

/// PUT /api/products/{id} (requires authentication, owner only)
pub async fn update_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProductsUseCase::new(state.repo.clone());

    let id = parse_product_path_id(&id)?;

    let input = UpdateProductInput {
        title: req.title,
        description: req.description,
        image_url: req.image_url,
        category: req.category,
        tags: req.tags,
        store_url: req.store_url,
        price: req.price,
    };

    let product = use_case.update(current.id, id, input).await?;

    Ok(Json(ProductResponse {
        product: product.into(),
    }))
}

/// DELETE /api/products/{id} (requires authentication, owner only)
pub async fn delete_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProductsUseCase::new(state.repo.clone());

    let id = parse_product_path_id(&id)?;

    use_case.delete(current.id, id).await?;

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

// ============================================================================
// Favorites
// ============================================================================

/// GET /api/favorites (requires authentication)
pub async fn list_favorites<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> CatalogResult<Json<FavoritesResponse>>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = FavoritesUseCase::new(state.repo.clone());

    let favorites = use_case.list(current.id).await?;

    Ok(Json(FavoritesResponse {
        favorites: favorites.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/favorites (requires authentication)
pub async fn add_favorite<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<AddFavoriteRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = FavoritesUseCase::new(state.repo.clone());

    let favorite = use_case.add(current.id, req.product_id.as_deref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(FavoriteResponse {
            favorite: favorite.into(),
        }),
    ))
}

/// DELETE /api/favorites/{product_id} (requires authentication)
pub async fn remove_favorite<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(product_id): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = FavoritesUseCase::new(state.repo.clone());

    use_case.remove(current.id, &product_id).await?;

    Ok(Json(MessageResponse::new("Favorite removed successfully")))
}

/// GET /api/favorites/check/{product_id} (requires authentication)
pub async fn check_favorite<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(product_id): Path<String>,
) -> CatalogResult<Json<CheckFavoriteResponse>>
where
    R: ProductRepository + FavoriteRepository + Clone + Send + Sync + 'static,
{
    let use_case = FavoritesUseCase::new(state.repo.clone());

    let is_favorited = use_case.check(current.id, &product_id).await?;

    Ok(Json(CheckFavoriteResponse { is_favorited }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_product_path_id(id: &str) -> CatalogResult<ProductId> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| CatalogError::Validation("Invalid product ID".to_string()))?;
    Ok(ProductId::from_uuid(uuid))
}
