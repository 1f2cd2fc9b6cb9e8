//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use kernel::id::UserId;
use platform::bearer::extract_bearer;

use crate::application::{
    CurrentUserOutput, CurrentUserUseCase, LoginInput, LoginUseCase, LogoutUseCase,
    ProfileUpdateInput, ProfileUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::provider::IdentityProvider;
use crate::domain::repository::ProfileRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthSessionResponse, CurrentUserResponse, LoginRequest, MessageResponse, ProfileResponse,
    RegisterRequest, UpdateProfileRequest, UpdateSubscriptionRequest, UserPayload,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<P, R>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    pub provider: Arc<P>,
    pub repo: Arc<R>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<P, R>(
    State(state): State<AuthAppState<P, R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.provider.clone(), state.repo.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        username: req.username,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthSessionResponse {
            user: output.user.into(),
            session: output.session.map(Into::into),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<P, R>(
    State(state): State<AuthAppState<P, R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<AuthSessionResponse>>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.provider.clone());

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(AuthSessionResponse {
        user: output.user.into(),
        session: Some(output.session.into()),
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Idempotent: succeeds with or without a token.
pub async fn logout<P, R>(
    State(state): State<AuthAppState<P, R>>,
    headers: HeaderMap,
) -> AuthResult<Json<MessageResponse>>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.provider.clone());

    use_case.execute(extract_bearer(&headers)).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
pub async fn me<P, R>(
    State(state): State<AuthAppState<P, R>>,
    headers: HeaderMap,
) -> AuthResult<Json<CurrentUserResponse>>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = CurrentUserUseCase::new(state.provider.clone(), state.repo.clone());

    let output = use_case.execute(extract_bearer(&headers)).await?;

    let user = match output {
        CurrentUserOutput::Profile(profile) => UserPayload::Profile(profile.into()),
        CurrentUserOutput::Identity(identity) => UserPayload::Identity(identity.into()),
    };

    Ok(Json(CurrentUserResponse { user }))
}

// ============================================================================
// User Profiles
// ============================================================================

/// GET /api/users/{user_id}
pub async fn get_user_profile<P, R>(
    State(state): State<AuthAppState<P, R>>,
    Path(user_id): Path<String>,
) -> AuthResult<Json<ProfileResponse>>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());

    // A non-UUID path segment can only be an unknown user
    let user_id = Uuid::parse_str(&user_id).map_err(|_| AuthError::ProfileNotFound)?;

    let profile = use_case.get(UserId::from_uuid(user_id)).await?;

    Ok(Json(ProfileResponse {
        user: profile.into(),
    }))
}

/// PUT /api/users/profile (requires authentication)
pub async fn update_user_profile<P, R>(
    State(state): State<AuthAppState<P, R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<ProfileResponse>>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());

    let input = ProfileUpdateInput {
        username: req.username,
        bio: req.bio,
        avatar_url: req.avatar_url,
    };

    let profile = use_case.update(current.id, input).await?;

    Ok(Json(ProfileResponse {
        user: profile.into(),
    }))
}

/// PUT /api/users/subscription (requires authentication)
pub async fn update_subscription<P, R>(
    State(state): State<AuthAppState<P, R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UpdateSubscriptionRequest>,
) -> AuthResult<Json<ProfileResponse>>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());

    let profile = use_case
        .update_subscription(current.id, req.subscription_plan.as_deref())
        .await?;

    Ok(Json(ProfileResponse {
        user: profile.into(),
    }))
}
