//! Logout Use Case
//!
//! Best-effort upstream token invalidation. Always succeeds: logging out
//! without a token (or with a dead one) is not an error.

use std::sync::Arc;

use crate::domain::provider::IdentityProvider;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
}

impl<P> LogoutUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, access_token: Option<&str>) -> AuthResult<()> {
        if let Some(token) = access_token {
            if let Err(e) = self.provider.sign_out(token).await {
                tracing::warn!(error = %e, "Upstream sign-out failed, token left to expire");
            }
        }

        Ok(())
    }
}
