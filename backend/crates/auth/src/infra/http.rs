//! Identity Provider HTTP Client
//!
//! Speaks the GoTrue-compatible REST dialect the managed provider exposes:
//! `/signup`, `/token?grant_type=password`, `/logout`, `/user`. Every call
//! carries the project `apikey`; user-scoped calls add the bearer token.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::application::config::IdentityConfig;
use crate::domain::entity::identity::{IdentityUser, Session, SignInData, SignUpData};
use crate::domain::provider::IdentityProvider;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// HTTP-backed identity provider
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(config: &IdentityConfig) -> AuthResult<Self> {
        let client = platform::http::build_client(&config.http)
            .map_err(|e| AuthError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(err: reqwest::Error) -> AuthError {
        tracing::error!(error = %err, "Identity provider request failed");
        AuthError::ProviderUnavailable
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, email: &Email, password: &str) -> AuthResult<SignUpData> {
        let response = self
            .client
            .post(self.endpoint("/signup"))
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email.as_str(), "password": password }))
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();

        if status.is_server_error() {
            return Err(AuthError::ProviderUnavailable);
        }
        if !status.is_success() {
            let message = read_error_message(response).await;
            return Err(AuthError::Provider(message));
        }

        // Autoconfirmed providers answer with a session envelope; providers
        // requiring email confirmation answer with the bare user record.
        let body: serde_json::Value = response.json().await.map_err(Self::transport_error)?;

        if body.get("access_token").is_some() {
            let wire: SessionWire = serde_json::from_value(body)
                .map_err(|e| AuthError::Internal(format!("Unexpected provider response: {e}")))?;
            let user = wire
                .user
                .clone()
                .ok_or_else(|| AuthError::Internal("Provider session without user".to_string()))?;

            Ok(SignUpData {
                user: user.into_identity(),
                session: Some(wire.into_session()),
            })
        } else {
            let wire: UserWire = serde_json::from_value(body)
                .map_err(|e| AuthError::Internal(format!("Unexpected provider response: {e}")))?;

            Ok(SignUpData {
                user: wire.into_identity(),
                session: None,
            })
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SignInData> {
        let response = self
            .client
            .post(self.endpoint("/token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();

        if status.is_server_error() {
            return Err(AuthError::ProviderUnavailable);
        }
        if !status.is_success() {
            let message = read_error_message(response).await;
            tracing::debug!(provider_message = %message, "Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let wire: SessionWire = response.json().await.map_err(Self::transport_error)?;
        let user = wire
            .user
            .clone()
            .ok_or_else(|| AuthError::Internal("Provider session without user".to_string()))?;

        Ok(SignInData {
            user: user.into_identity(),
            session: wire.into_session(),
        })
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(self.endpoint("/logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            let message = read_error_message(response).await;
            return Err(AuthError::Provider(message));
        }

        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> AuthResult<IdentityUser> {
        let response = self
            .client
            .get(self.endpoint("/user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();

        if status.is_server_error() {
            return Err(AuthError::ProviderUnavailable);
        }
        if !status.is_success() {
            return Err(AuthError::TokenInvalid);
        }

        let wire: UserWire = response.json().await.map_err(Self::transport_error)?;

        Ok(wire.into_identity())
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct UserWire {
    id: Uuid,
    email: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl UserWire {
    fn into_identity(self) -> IdentityUser {
        IdentityUser {
            id: UserId::from_uuid(self.id),
            email: self.email,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionWire {
    access_token: String,
    token_type: String,
    expires_in: i64,
    expires_at: Option<i64>,
    refresh_token: Option<String>,
    user: Option<UserWire>,
}

impl SessionWire {
    fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            token_type: self.token_type,
            expires_in: self.expires_in,
            expires_at: self.expires_at,
            refresh_token: self.refresh_token,
        }
    }
}

/// Provider error bodies vary between dialect versions; take the first
/// message field that is present.
#[derive(Debug, Default, Deserialize)]
struct ErrorWire {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

async fn read_error_message(response: reqwest::Response) -> String {
    let wire: ErrorWire = response.json().await.unwrap_or_default();

    wire.error_description
        .or(wire.msg)
        .or(wire.message)
        .or(wire.error)
        .unwrap_or_else(|| "Identity provider error".to_string())
}
