//! Current User Use Case
//!
//! Resolves the caller behind a bearer token: identity record first, then
//! the richer profile row when one exists.

use std::sync::Arc;

use crate::domain::entity::identity::IdentityUser;
use crate::domain::entity::user_profile::UserProfile;
use crate::domain::provider::IdentityProvider;
use crate::domain::repository::ProfileRepository;
use crate::error::{AuthError, AuthResult};

/// Resolved caller.
///
/// `Identity` is the fallback when the profile row is missing (e.g. a
/// register whose provisioning step failed).
pub enum CurrentUserOutput {
    Profile(UserProfile),
    Identity(IdentityUser),
}

/// Current user use case
pub struct CurrentUserUseCase<P, R>
where
    P: IdentityProvider,
    R: ProfileRepository,
{
    provider: Arc<P>,
    profile_repo: Arc<R>,
}

impl<P, R> CurrentUserUseCase<P, R>
where
    P: IdentityProvider,
    R: ProfileRepository,
{
    pub fn new(provider: Arc<P>, profile_repo: Arc<R>) -> Self {
        Self {
            provider,
            profile_repo,
        }
    }

    pub async fn execute(&self, access_token: Option<&str>) -> AuthResult<CurrentUserOutput> {
        let token = access_token.ok_or(AuthError::TokenMissing)?;

        let identity = self.provider.get_user(token).await?;

        match self.profile_repo.find_by_id(identity.id).await? {
            Some(profile) => Ok(CurrentUserOutput::Profile(profile)),
            None => {
                tracing::warn!(user_id = %identity.id, "No profile row, returning identity record");
                Ok(CurrentUserOutput::Identity(identity))
            }
        }
    }
}
