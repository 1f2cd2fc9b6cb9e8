//! Profile Use Cases
//!
//! Public profile lookup plus the caller's own profile/plan updates.
//! Mutations are filtered by the caller's id; a zero-row match surfaces as
//! the generic store error (400), never as forbidden/not-found.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user_profile::{ProfileChanges, UserProfile};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::subscription_plan::SubscriptionPlan;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Raw optional-field input for a profile update
#[derive(Debug, Default)]
pub struct ProfileUpdateInput {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Profile use case
pub struct ProfileUseCase<R>
where
    R: ProfileRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: ProfileRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Public profile lookup by user id
    pub async fn get(&self, user_id: UserId) -> AuthResult<UserProfile> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::ProfileNotFound)
    }

    /// Update the caller's own display attributes
    pub async fn update(
        &self,
        caller: UserId,
        input: ProfileUpdateInput,
    ) -> AuthResult<UserProfile> {
        let username = input
            .username
            .as_deref()
            .map(Username::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let changes = ProfileChanges {
            username,
            bio: input.bio,
            avatar_url: input.avatar_url,
        };

        self.repo
            .update_profile(caller, &changes)
            .await?
            .ok_or(AuthError::NoRowMatched)
    }

    /// Change the caller's subscription plan
    pub async fn update_subscription(
        &self,
        caller: UserId,
        plan: Option<&str>,
    ) -> AuthResult<UserProfile> {
        let plan: SubscriptionPlan = plan
            .and_then(|p| p.parse().ok())
            .ok_or(AuthError::InvalidPlan)?;

        let updated = self
            .repo
            .update_plan(caller, plan)
            .await?
            .ok_or(AuthError::NoRowMatched)?;

        tracing::info!(user_id = %caller, plan = %plan, "Subscription plan changed");

        Ok(updated)
    }
}
