//! Login Use Case
//!
//! Verifies credentials against the identity provider.

use std::sync::Arc;

use crate::application::register::require_credentials;
use crate::domain::entity::identity::SignInData;
use crate::domain::provider::IdentityProvider;
use crate::error::AuthResult;

/// Login input
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login use case
pub struct LoginUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
}

impl<P> LoginUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<SignInData> {
        let (email, password) = require_credentials(input.email, input.password)?;

        // No format validation here: an unknown-shaped email is simply an
        // account that does not exist, and must surface as 401
        let signin = self.provider.sign_in(email.trim(), &password).await?;

        tracing::info!(user_id = %signin.user.id, "User logged in");

        Ok(signin)
    }
}
