//! User Profile Entity
//!
//! The application-owned `users` row, distinct from the identity provider's
//! account record. Holds display attributes and the subscription plan.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::subscription_plan::SubscriptionPlan;
use crate::domain::value_object::username::Username;

/// User profile entity
#[derive(Debug, Clone)]
pub struct UserProfile {
    /// Identity-provider subject (never locally generated)
    pub id: UserId,
    pub email: Option<String>,
    pub username: Username,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub subscription_plan: SubscriptionPlan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Provision a fresh profile row at signup.
    ///
    /// Plan always starts at `free`; display attributes start empty.
    pub fn provision(id: UserId, email: Option<String>, username: Username) -> Self {
        let now = Utc::now();

        Self {
            id,
            email,
            username,
            avatar_url: None,
            bio: None,
            subscription_plan: SubscriptionPlan::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Optional-field update for a profile row.
///
/// `None` means "leave unchanged"; clearing a field to NULL is not part of
/// the contract.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<Username>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.bio.is_none() && self.avatar_url.is_none()
    }
}
