//! API DTOs (Data Transfer Objects)
//!
//! Snake_case wire fields throughout; `isFavorited` is the one camelCase
//! field the contract names, expressed with an explicit rename.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::favorite::{Favorite, FavoriteWithProduct};
use crate::domain::entity::product::{OwnerSummary, Product, ProductWithOwner};

// ============================================================================
// Products
// ============================================================================

/// Public projection of a product's owner
#[derive(Debug, Clone, Serialize)]
pub struct OwnerDto {
    pub username: String,
    pub avatar_url: Option<String>,
}

impl From<OwnerSummary> for OwnerDto {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            username: owner.username,
            avatar_url: owner.avatar_url,
        }
    }
}

/// Product as returned by the products endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub image_url: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub store_url: Option<String>,
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined owner projection; absent on endpoints that do not join
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerDto>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into_uuid(),
            user_id: product.user_id.into_uuid(),
            title: product.title,
            image_url: product.image_url,
            description: product.description,
            category: product.category,
            tags: product.tags,
            store_url: product.store_url,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
            owner: None,
        }
    }
}

impl From<ProductWithOwner> for ProductDto {
    fn from(joined: ProductWithOwner) -> Self {
        let mut dto = ProductDto::from(joined.product);
        dto.owner = joined.owner.map(Into::into);
        dto
    }
}

/// Feed query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Kept as strings so a malformed number answers the contract's 400
    /// JSON body instead of an extractor rejection
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Product create request (presence is validated in the use case)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub store_url: Option<String>,
    pub price: Option<f64>,
}

/// Product update request (all fields optional; `None` = leave unchanged)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub store_url: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub product: ProductDto,
}

// ============================================================================
// Favorites
// ============================================================================

/// Favorite as returned by the favorites endpoints
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Joined product (listing endpoint only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDto>,
}

impl From<Favorite> for FavoriteDto {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id.into_uuid(),
            user_id: favorite.user_id.into_uuid(),
            product_id: favorite.product_id.into_uuid(),
            created_at: favorite.created_at,
            product: None,
        }
    }
}

impl From<FavoriteWithProduct> for FavoriteDto {
    fn from(joined: FavoriteWithProduct) -> Self {
        let mut dto = FavoriteDto::from(joined.favorite);
        dto.product = joined.product.map(Into::into);
        dto
    }
}

/// Favorite create request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddFavoriteRequest {
    /// Kept as a string so a malformed id answers 400 JSON
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteResponse {
    pub favorite: FavoriteDto,
}

/// Presence flag for `GET /favorites/check/{product_id}`
#[derive(Debug, Clone, Serialize)]
pub struct CheckFavoriteResponse {
    #[serde(rename = "isFavorited")]
    pub is_favorited: bool,
}

// ============================================================================
// Generic
// ============================================================================

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
