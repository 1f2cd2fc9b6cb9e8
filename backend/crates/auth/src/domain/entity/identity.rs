//! Identity Records
//!
//! Data owned by the external identity provider: the account record and the
//! issued session. Both are consumed verbatim; this service never mints or
//! mutates either.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

/// Account record held by the identity provider.
///
/// `id` is the provider subject and doubles as the profile-row primary key.
#[derive(Debug, Clone)]
pub struct IdentityUser {
    pub id: UserId,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Bearer session issued by the identity provider.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque bearer credential sent back on every authenticated request
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    /// Absolute expiry (unix seconds), when the provider reports one
    pub expires_at: Option<i64>,
    pub refresh_token: Option<String>,
}

/// Result of a provider sign-up.
///
/// The session is absent when the provider defers it (e.g. email
/// confirmation required).
#[derive(Debug, Clone)]
pub struct SignUpData {
    pub user: IdentityUser,
    pub session: Option<Session>,
}

/// Result of a provider password sign-in.
#[derive(Debug, Clone)]
pub struct SignInData {
    pub user: IdentityUser,
    pub session: Session,
}
