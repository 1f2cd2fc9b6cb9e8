//! Register Use Case
//!
//! Creates a new identity account and provisions the matching profile row.

use std::sync::Arc;

use crate::domain::entity::identity::{IdentityUser, Session};
use crate::domain::entity::user_profile::UserProfile;
use crate::domain::provider::IdentityProvider;
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::email::Email;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub user: IdentityUser,
    pub session: Option<Session>,
}

/// Register use case
pub struct RegisterUseCase<P, R>
where
    P: IdentityProvider,
    R: ProfileRepository,
{
    provider: Arc<P>,
    profile_repo: Arc<R>,
}

impl<P, R> RegisterUseCase<P, R>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let (email, password) = require_credentials(input.email, input.password)?;

        let email =
            Email::new(email).map_err(|e| AuthError::Validation(e.message().to_string()))?;

        // Credential creation is the provider's; a rejection maps to 400
        let signup = self.provider.sign_up(&email, &password).await?;

        // Provision the profile row. A failure here is logged and does NOT
        // fail the request: the identity account already exists upstream.
        // The insert is idempotent, so a retried register heals the gap.
        let username = match input.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                Username::new(name).map_err(|e| AuthError::Validation(e.to_string()))?
            }
            _ => Username::from_email(&email),
        };

        let profile = UserProfile::provision(
            signup.user.id,
            signup.user.email.clone().or_else(|| Some(email.into_inner())),
            username,
        );

        if let Err(e) = self.profile_repo.create_if_absent(&profile).await {
            tracing::error!(
                user_id = %profile.id,
                error = %e,
                "Profile provisioning failed after identity creation"
            );
        }

        tracing::info!(user_id = %signup.user.id, "User registered");

        Ok(RegisterOutput {
            user: signup.user,
            session: signup.session,
        })
    }
}

/// Shared presence check for register/login credentials
pub(crate) fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> AuthResult<(String, String)> {
    match (email, password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(AuthError::MissingCredentials),
    }
}
