//! Favorite Entity
//!
//! A (user, product) bookmark. Unique per pair at the store level.

use chrono::{DateTime, Utc};
use kernel::id::{FavoriteId, ProductId, UserId};

use crate::domain::entity::product::ProductWithOwner;

/// Favorite entity
#[derive(Debug, Clone)]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

/// A favorite joined with its product (and the product's owner projection).
///
/// The product is `None` only if the row outlived its product, which the
/// cascading foreign key prevents in practice.
#[derive(Debug, Clone)]
pub struct FavoriteWithProduct {
    pub favorite: Favorite,
    pub product: Option<ProductWithOwner>,
}
