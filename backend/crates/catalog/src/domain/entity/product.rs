//! Product Entity
//!
//! A published listing. Title and image are mandatory; everything else is
//! seller-optional. Rows only ever mutate under their owner's id.

use chrono::{DateTime, Utc};
use kernel::id::{ProductId, UserId};

/// Product entity
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub user_id: UserId,
    pub title: String,
    pub image_url: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub store_url: Option<String>,
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal public projection of a product's owner, joined into listings
#[derive(Debug, Clone)]
pub struct OwnerSummary {
    pub username: String,
    pub avatar_url: Option<String>,
}

/// A product joined with its owner's public projection.
///
/// The owner is `None` only when the profile row is missing (a register
/// whose provisioning step failed).
#[derive(Debug, Clone)]
pub struct ProductWithOwner {
    pub product: Product,
    pub owner: Option<OwnerSummary>,
}

/// Validated input for a product insert; `user_id` is always the caller
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub user_id: UserId,
    pub title: String,
    pub image_url: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub store_url: Option<String>,
    pub price: Option<f64>,
}

/// Optional-field update for a product row.
///
/// `None` means "leave unchanged"; clearing a field to NULL is not part of
/// the contract.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub store_url: Option<String>,
    pub price: Option<f64>,
}

/// Default page size for the public feed
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Query predicates for the public product feed
#[derive(Debug, Clone)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}
