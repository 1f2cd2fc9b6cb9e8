//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user_profile::{ProfileChanges, UserProfile};
use crate::domain::value_object::subscription_plan::SubscriptionPlan;
use crate::error::AuthResult;

/// User profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Provision a profile row at signup.
    ///
    /// Idempotent: an existing row for the same subject is left untouched,
    /// so a retried register heals a previously failed provisioning.
    async fn create_if_absent(&self, profile: &UserProfile) -> AuthResult<()>;

    /// Find a profile by its identity subject
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<UserProfile>>;

    /// Apply an optional-field update to the caller's own row.
    ///
    /// Returns `None` when no row matched the id filter.
    async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<UserProfile>>;

    /// Change the caller's subscription plan.
    ///
    /// Returns `None` when no row matched the id filter.
    async fn update_plan(
        &self,
        user_id: UserId,
        plan: SubscriptionPlan,
    ) -> AuthResult<Option<UserProfile>>;
}
