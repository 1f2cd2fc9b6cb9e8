//! Identity Provider Trait
//!
//! Interface to the external service of record for credentials and session
//! issuance/validation. The HTTP implementation is in the infra layer.

use crate::domain::entity::identity::{IdentityUser, SignInData, SignUpData};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Identity provider trait
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Create credentials for a new account
    async fn sign_up(&self, email: &Email, password: &str) -> AuthResult<SignUpData>;

    /// Verify credentials and issue a session.
    ///
    /// The email is passed through unvalidated: a malformed address is just
    /// an unknown account, and must fail as invalid credentials (401), not
    /// as a validation error.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SignInData>;

    /// Invalidate a session token upstream
    async fn sign_out(&self, access_token: &str) -> AuthResult<()>;

    /// Resolve the account behind a bearer token
    async fn get_user(&self, access_token: &str) -> AuthResult<IdentityUser>;
}
