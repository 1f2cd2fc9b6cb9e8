//! API DTOs (Data Transfer Objects)
//!
//! JSON field names are snake_case throughout, matching the wire contract
//! the client already speaks (`image_url`, `subscription_plan`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::identity::{IdentityUser, Session};
use crate::domain::entity::user_profile::UserProfile;
use crate::domain::value_object::subscription_plan::SubscriptionPlan;

// ============================================================================
// Register / Login
// ============================================================================

/// Register request.
///
/// Fields are optional so that presence is validated in the use case and a
/// missing field answers 400 with the contract message, not a decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Identity record as returned by register/login/me
#[derive(Debug, Clone, Serialize)]
pub struct IdentityUserDto {
    pub id: Uuid,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<IdentityUser> for IdentityUserDto {
    fn from(user: IdentityUser) -> Self {
        Self {
            id: user.id.into_uuid(),
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Bearer session as issued by the identity provider
#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: Option<i64>,
    pub refresh_token: Option<String>,
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            access_token: session.access_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            expires_at: session.expires_at,
            refresh_token: session.refresh_token,
        }
    }
}

/// Register/login response body
#[derive(Debug, Clone, Serialize)]
pub struct AuthSessionResponse {
    pub user: IdentityUserDto,
    pub session: Option<SessionDto>,
}

// ============================================================================
// Current User / Profiles
// ============================================================================

/// Profile row as returned by the users endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    pub id: Uuid,
    pub email: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub subscription_plan: SubscriptionPlan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.into_uuid(),
            email: profile.email,
            username: profile.username.into_inner(),
            avatar_url: profile.avatar_url,
            bio: profile.bio,
            subscription_plan: profile.subscription_plan,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// `GET /auth/me` payload: the profile row when present, otherwise the bare
/// identity record
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UserPayload {
    Profile(ProfileDto),
    Identity(IdentityUserDto),
}

/// Envelope for `/auth/me`
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub user: UserPayload,
}

/// Envelope for the users endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: ProfileDto,
}

/// Profile update request (all fields optional; `None` = leave unchanged)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Subscription update request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub subscription_plan: Option<String>,
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
