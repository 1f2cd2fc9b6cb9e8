//! Favorites Use Cases
//!
//! All operations are implicitly scoped to the authenticated caller.

use std::sync::Arc;

use kernel::id::{ProductId, UserId};
use uuid::Uuid;

use crate::domain::entity::favorite::{Favorite, FavoriteWithProduct};
use crate::domain::repository::FavoriteRepository;
use crate::error::{CatalogError, CatalogResult};

/// Favorites use case
pub struct FavoritesUseCase<R>
where
    R: FavoriteRepository,
{
    repo: Arc<R>,
}

impl<R> FavoritesUseCase<R>
where
    R: FavoriteRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Caller's favorites, newest first
    pub async fn list(&self, caller: UserId) -> CatalogResult<Vec<FavoriteWithProduct>> {
        self.repo.list_for_user(caller).await
    }

    /// Favorite a product.
    ///
    /// The duplicate-pair case comes back from the store's unique
    /// constraint as `AlreadyFavorited`; there is no pre-check.
    pub async fn add(&self, caller: UserId, product_id: Option<&str>) -> CatalogResult<Favorite> {
        let product_id = parse_product_id(product_id)?;

        let favorite = self.repo.insert(caller, product_id).await?;

        tracing::info!(product_id = %product_id, user_id = %caller, "Product favorited");

        Ok(favorite)
    }

    /// Remove the caller's favorite of a product.
    ///
    /// Succeeds whether or not a row matched.
    pub async fn remove(&self, caller: UserId, product_id: &str) -> CatalogResult<()> {
        let product_id = parse_product_id(Some(product_id))?;

        self.repo.delete(caller, product_id).await?;

        Ok(())
    }

    /// Presence flag for one product
    pub async fn check(&self, caller: UserId, product_id: &str) -> CatalogResult<bool> {
        let product_id = parse_product_id(Some(product_id))?;

        self.repo.exists(caller, product_id).await
    }
}

fn parse_product_id(value: Option<&str>) -> CatalogResult<ProductId> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(CatalogError::MissingProductId)?;

    let uuid = Uuid::parse_str(value)
        .map_err(|_| CatalogError::Validation("Invalid product ID".to_string()))?;

    Ok(ProductId::from_uuid(uuid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        let uuid = Uuid::new_v4();
        let parsed = parse_product_id(Some(&uuid.to_string())).unwrap();
        assert_eq!(parsed.as_uuid(), &uuid);
    }

    #[test]
    fn test_parse_product_id_missing() {
        assert!(matches!(
            parse_product_id(None),
            Err(CatalogError::MissingProductId)
        ));
        assert!(matches!(
            parse_product_id(Some("  ")),
            Err(CatalogError::MissingProductId)
        ));
    }

    #[test]
    fn test_parse_product_id_garbage() {
        assert!(matches!(
            parse_product_id(Some("not-a-uuid")),
            Err(CatalogError::Validation(_))
        ));
    }
}
