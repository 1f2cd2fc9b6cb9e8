//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.
//!
//! The contract is a degenerate state machine: presence + upstream validity
//! of the bearer token either attaches [`CurrentUser`] to the request or
//! short-circuits with 401 before any handler runs. No refresh, no rotation,
//! no rate limiting.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use std::sync::Arc;

use crate::domain::provider::IdentityProvider;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<P>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    pub provider: Arc<P>,
}

/// Resolved caller, stored in request extensions by [`require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// Middleware that requires a valid bearer token.
///
/// On success the resolved [`CurrentUser`] is inserted into the request
/// extensions for handlers to pick up via `Extension<CurrentUser>`.
pub async fn require_auth<P>(
    state: AuthMiddlewareState<P>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
{
    let Some(token) = platform::bearer::extract_bearer(req.headers()) else {
        return Err(AuthError::TokenMissing.into_response());
    };

    match state.provider.get_user(token).await {
        Ok(identity) => {
            req.extensions_mut().insert(CurrentUser {
                id: identity.id,
                email: identity.email,
            });
            Ok(next.run(req).await)
        }
        Err(e) => Err(e.into_response()),
    }
}
