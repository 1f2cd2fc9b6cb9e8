//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{ProductId, UserId};

use crate::domain::entity::favorite::{Favorite, FavoriteWithProduct};
use crate::domain::entity::product::{
    NewProduct, Product, ProductChanges, ProductFilter, ProductWithOwner,
};
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Public feed: filtered, newest first, owner projection joined
    async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<ProductWithOwner>>;

    /// Find one product by primary key, owner projection joined
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<ProductWithOwner>>;

    /// All products of one user, newest first (no owner join)
    async fn list_by_user(&self, user_id: UserId) -> CatalogResult<Vec<Product>>;

    /// Insert a new product row
    async fn insert(&self, new: &NewProduct) -> CatalogResult<Product>;

    /// Ownership-filtered partial update (`id AND user_id` in one statement).
    ///
    /// Returns `None` when no row matched the combined filter; the caller
    /// cannot tell a missing row from a foreign owner, by contract.
    async fn update_owned(
        &self,
        id: ProductId,
        owner: UserId,
        changes: &ProductChanges,
    ) -> CatalogResult<Option<Product>>;

    /// Ownership-filtered delete; returns the matched-row count
    async fn delete_owned(&self, id: ProductId, owner: UserId) -> CatalogResult<u64>;
}

/// Favorite repository trait
#[trait_variant::make(FavoriteRepository: Send)]
pub trait LocalFavoriteRepository {
    /// Caller's favorites, newest first, products and owners joined
    async fn list_for_user(&self, user_id: UserId) -> CatalogResult<Vec<FavoriteWithProduct>>;

    /// Insert a (user, product) pair.
    ///
    /// A duplicate pair fails with `CatalogError::AlreadyFavorited`
    /// (store-level unique constraint, no check-then-insert race).
    async fn insert(&self, user_id: UserId, product_id: ProductId) -> CatalogResult<Favorite>;

    /// Delete the caller's favorite of one product; returns the matched count
    async fn delete(&self, user_id: UserId, product_id: ProductId) -> CatalogResult<u64>;

    /// Presence check; a missing row is a valid negative, not an error
    async fn exists(&self, user_id: UserId, product_id: ProductId) -> CatalogResult<bool>;
}
