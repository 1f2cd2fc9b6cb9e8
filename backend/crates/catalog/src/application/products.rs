//! Products Use Cases
//!
//! Public feed + ownership-scoped mutations. All authorization is the
//! single-statement `id AND user_id` filter in the repository; nothing here
//! fetches before checking.

use std::sync::Arc;

use kernel::id::{ProductId, UserId};

use crate::domain::entity::product::{
    DEFAULT_LIST_LIMIT, NewProduct, Product, ProductChanges, ProductFilter, ProductWithOwner,
};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// Raw query-string input for the public feed
#[derive(Debug, Default)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Raw input for a product create
#[derive(Debug, Default)]
pub struct CreateProductInput {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub store_url: Option<String>,
    pub price: Option<f64>,
}

/// Raw input for a product update (all fields optional)
#[derive(Debug, Default)]
pub struct UpdateProductInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub store_url: Option<String>,
    pub price: Option<f64>,
}

/// Products use case
pub struct ProductsUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> ProductsUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Public feed with optional search/category predicates and paging
    pub async fn list(&self, query: ProductListQuery) -> CatalogResult<Vec<ProductWithOwner>> {
        let limit = parse_page_param(query.limit.as_deref(), DEFAULT_LIST_LIMIT)?;
        let offset = parse_page_param(query.offset.as_deref(), 0)?;

        let filter = ProductFilter {
            search: query.search.filter(|s| !s.is_empty()),
            category: query.category.filter(|c| !c.is_empty()),
            limit,
            offset,
        };

        self.repo.list(&filter).await
    }

    /// Public lookup by id
    pub async fn get(&self, id: ProductId) -> CatalogResult<ProductWithOwner> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }

    /// All products of one user, newest first
    pub async fn list_by_user(&self, user_id: UserId) -> CatalogResult<Vec<Product>> {
        self.repo.list_by_user(user_id).await
    }

    /// Create a listing owned by the caller
    pub async fn create(
        &self,
        caller: UserId,
        input: CreateProductInput,
    ) -> CatalogResult<Product> {
        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let image_url = input
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty());

        let (Some(title), Some(image_url)) = (title, image_url) else {
            return Err(CatalogError::MissingProductFields);
        };

        let new = NewProduct {
            user_id: caller,
            title: title.to_string(),
            image_url: image_url.to_string(),
            description: input.description,
            category: input.category,
            tags: input.tags,
            store_url: input.store_url,
            price: input.price,
        };

        let product = self.repo.insert(&new).await?;

        tracing::info!(product_id = %product.id, user_id = %caller, "Product created");

        Ok(product)
    }

    /// Update a listing the caller owns
    pub async fn update(
        &self,
        caller: UserId,
        id: ProductId,
        input: UpdateProductInput,
    ) -> CatalogResult<Product> {
        let changes = ProductChanges {
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            category: input.category,
            tags: input.tags,
            store_url: input.store_url,
            price: input.price,
        };

        self.repo
            .update_owned(id, caller, &changes)
            .await?
            .ok_or(CatalogError::NoRowMatched)
    }

    /// Delete a listing the caller owns.
    ///
    /// Succeeds whether or not a row matched; no existence check is made.
    pub async fn delete(&self, caller: UserId, id: ProductId) -> CatalogResult<()> {
        let deleted = self.repo.delete_owned(id, caller).await?;

        if deleted > 0 {
            tracing::info!(product_id = %id, user_id = %caller, "Product deleted");
        }

        Ok(())
    }
}

/// Parse a limit/offset query parameter; absent or empty means the default
fn parse_page_param(value: Option<&str>, default: i64) -> CatalogResult<i64> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };

    let parsed: i64 = value
        .parse()
        .map_err(|_| CatalogError::Validation("Invalid pagination parameter".to_string()))?;

    if parsed < 0 {
        return Err(CatalogError::Validation(
            "Invalid pagination parameter".to_string(),
        ));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_param_defaults() {
        assert_eq!(parse_page_param(None, 20).unwrap(), 20);
        assert_eq!(parse_page_param(Some(""), 20).unwrap(), 20);
        assert_eq!(parse_page_param(Some("  "), 0).unwrap(), 0);
    }

    #[test]
    fn test_parse_page_param_values() {
        assert_eq!(parse_page_param(Some("5"), 20).unwrap(), 5);
        assert_eq!(parse_page_param(Some("0"), 20).unwrap(), 0);
    }

    #[test]
    fn test_parse_page_param_rejects_garbage() {
        assert!(parse_page_param(Some("abc"), 20).is_err());
        assert!(parse_page_param(Some("-1"), 20).is_err());
        assert!(parse_page_param(Some("1.5"), 20).is_err());
    }
}
