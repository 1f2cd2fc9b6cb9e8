//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{PromotionId, UserId};

use crate::domain::entity::promotion::{
    NewPromotion, Promotion, PromotionChanges, PromotionWithProduct,
};
use crate::error::PromotionResult;

/// Promotion repository trait
#[trait_variant::make(PromotionRepository: Send)]
pub trait LocalPromotionRepository {
    /// Caller's promotions, newest first, promoted product joined
    async fn list_for_user(&self, user_id: UserId) -> PromotionResult<Vec<PromotionWithProduct>>;

    /// One promotion by primary key AND owner, product joined
    async fn find_owned(
        &self,
        id: PromotionId,
        owner: UserId,
    ) -> PromotionResult<Option<PromotionWithProduct>>;

    /// Insert a new campaign (status `active`, counters zeroed)
    async fn insert(&self, new: &NewPromotion) -> PromotionResult<Promotion>;

    /// Ownership-filtered partial update (`id AND user_id` in one statement).
    ///
    /// Returns `None` when no row matched the combined filter.
    async fn update_owned(
        &self,
        id: PromotionId,
        owner: UserId,
        changes: &PromotionChanges,
    ) -> PromotionResult<Option<Promotion>>;

    /// Ownership-filtered delete; returns the matched-row count
    async fn delete_owned(&self, id: PromotionId, owner: UserId) -> PromotionResult<u64>;

    /// Atomic `impressions = impressions + 1`; returns the matched count.
    ///
    /// Single-statement increments are what keeps concurrent tracking
    /// lost-update free.
    async fn increment_impressions(&self, id: PromotionId) -> PromotionResult<u64>;

    /// Atomic `clicks = clicks + 1`; returns the matched count
    async fn increment_clicks(&self, id: PromotionId) -> PromotionResult<u64>;
}
