//! Unit tests for auth crate
//!
//! Router-level coverage runs against in-memory provider/repository doubles
//! so the full request → middleware → use case → response path is exercised.

mod support {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use kernel::id::UserId;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::domain::entity::identity::{IdentityUser, Session, SignInData, SignUpData};
    use crate::domain::entity::user_profile::{ProfileChanges, UserProfile};
    use crate::domain::provider::IdentityProvider;
    use crate::domain::repository::ProfileRepository;
    use crate::domain::value_object::email::Email;
    use crate::domain::value_object::subscription_plan::SubscriptionPlan;
    use crate::error::{AuthError, AuthResult};

    /// In-memory identity provider double
    #[derive(Clone, Default)]
    pub struct MemoryProvider {
        // email -> (password, subject)
        accounts: Arc<Mutex<HashMap<String, (String, Uuid)>>>,
        // token -> subject
        tokens: Arc<Mutex<HashMap<String, Uuid>>>,
    }

    impl MemoryProvider {
        fn issue_session(&self, user_id: Uuid) -> Session {
            let token = format!("token-{}", Uuid::new_v4());
            self.tokens.lock().unwrap().insert(token.clone(), user_id);

            Session {
                access_token: token,
                token_type: "bearer".to_string(),
                expires_in: 3600,
                expires_at: None,
                refresh_token: None,
            }
        }
    }

    impl IdentityProvider for MemoryProvider {
        async fn sign_up(&self, email: &Email, password: &str) -> AuthResult<SignUpData> {
            let user_id = Uuid::new_v4();

            {
                let mut accounts = self.accounts.lock().unwrap();
                if accounts.contains_key(email.as_str()) {
                    return Err(AuthError::Provider("User already registered".to_string()));
                }
                accounts.insert(email.as_str().to_string(), (password.to_string(), user_id));
            }

            let session = self.issue_session(user_id);

            Ok(SignUpData {
                user: IdentityUser {
                    id: UserId::from_uuid(user_id),
                    email: Some(email.as_str().to_string()),
                    created_at: None,
                },
                session: Some(session),
            })
        }

        async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SignInData> {
            let user_id = {
                let accounts = self.accounts.lock().unwrap();
                match accounts.get(email) {
                    Some((stored, id)) if stored == password => *id,
                    _ => return Err(AuthError::InvalidCredentials),
                }
            };

            let session = self.issue_session(user_id);

            Ok(SignInData {
                user: IdentityUser {
                    id: UserId::from_uuid(user_id),
                    email: Some(email.to_string()),
                    created_at: None,
                },
                session,
            })
        }

        async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
            self.tokens.lock().unwrap().remove(access_token);
            Ok(())
        }

        async fn get_user(&self, access_token: &str) -> AuthResult<IdentityUser> {
            let user_id = self
                .tokens
                .lock()
                .unwrap()
                .get(access_token)
                .copied()
                .ok_or(AuthError::TokenInvalid)?;

            Ok(IdentityUser {
                id: UserId::from_uuid(user_id),
                email: None,
                created_at: None,
            })
        }
    }

    /// In-memory profile repository double
    #[derive(Clone, Default)]
    pub struct MemoryProfiles {
        rows: Arc<Mutex<HashMap<Uuid, UserProfile>>>,
        fail_writes: Arc<AtomicBool>,
    }

    impl MemoryProfiles {
        pub fn failing_writes() -> Self {
            let repo = Self::default();
            repo.fail_writes.store(true, Ordering::SeqCst);
            repo
        }
    }

    impl ProfileRepository for MemoryProfiles {
        async fn create_if_absent(&self, profile: &UserProfile) -> AuthResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(AuthError::Store("insert failed".to_string()));
            }

            self.rows
                .lock()
                .unwrap()
                .entry(profile.id.into_uuid())
                .or_insert_with(|| profile.clone());

            Ok(())
        }

        async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<UserProfile>> {
            Ok(self.rows.lock().unwrap().get(user_id.as_uuid()).cloned())
        }

        async fn update_profile(
            &self,
            user_id: UserId,
            changes: &ProfileChanges,
        ) -> AuthResult<Option<UserProfile>> {
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.get_mut(user_id.as_uuid()) else {
                return Ok(None);
            };

            if let Some(username) = &changes.username {
                row.username = username.clone();
            }
            if let Some(bio) = &changes.bio {
                row.bio = Some(bio.clone());
            }
            if let Some(avatar_url) = &changes.avatar_url {
                row.avatar_url = Some(avatar_url.clone());
            }
            row.updated_at = chrono::Utc::now();

            Ok(Some(row.clone()))
        }

        async fn update_plan(
            &self,
            user_id: UserId,
            plan: SubscriptionPlan,
        ) -> AuthResult<Option<UserProfile>> {
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.get_mut(user_id.as_uuid()) else {
                return Ok(None);
            };

            row.subscription_plan = plan;
            row.updated_at = chrono::Utc::now();

            Ok(Some(row.clone()))
        }
    }

    pub fn auth_app() -> (Router, MemoryProvider, MemoryProfiles) {
        let provider = MemoryProvider::default();
        let repo = MemoryProfiles::default();
        let router =
            crate::presentation::router::auth_router_generic(provider.clone(), repo.clone());
        (router, provider, repo)
    }

    pub fn users_app(provider: MemoryProvider, repo: MemoryProfiles) -> Router {
        crate::presentation::router::users_router_generic(provider, repo)
    }

    pub async fn send_json(
        router: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        router.clone().oneshot(request).await.unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Register a user and return (subject id as string, access token)
    pub async fn register(router: &Router, email: &str, password: &str) -> (String, String) {
        let response = send_json(
            router,
            "POST",
            "/register",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(response.status(), 201);

        let body = body_json(response).await;
        let user_id = body["user"]["id"].as_str().unwrap().to_string();
        let token = body["session"]["access_token"].as_str().unwrap().to_string();
        (user_id, token)
    }
}

mod register_tests {
    use super::support::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_register_creates_account_and_profile() {
        let (router, _provider, _repo) = auth_app();

        let (user_id, token) = register(&router, "alice@example.com", "password123").await;
        assert!(!token.is_empty());

        // Profile row was provisioned with the defaulted username
        let response = send_json(&router, "GET", "/me", Some(&token), None).await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["user"]["id"].as_str().unwrap(), user_id);
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["user"]["subscription_plan"], "free");
    }

    #[tokio::test]
    async fn test_register_explicit_username() {
        let (router, _provider, _repo) = auth_app();

        let response = send_json(
            &router,
            "POST",
            "/register",
            None,
            Some(json!({
                "email": "bob@example.com",
                "password": "password123",
                "username": "BobsStore"
            })),
        )
        .await;
        assert_eq!(response.status(), 201);

        let body = body_json(response).await;
        let token = body["session"]["access_token"].as_str().unwrap().to_string();

        let me = body_json(send_json(&router, "GET", "/me", Some(&token), None).await).await;
        assert_eq!(me["user"]["username"], "BobsStore");
    }

    #[tokio::test]
    async fn test_register_missing_password_is_400() {
        let (router, _provider, _repo) = auth_app();

        let response = send_json(
            &router,
            "POST",
            "/register",
            None,
            Some(json!({ "email": "alice@example.com" })),
        )
        .await;
        assert_eq!(response.status(), 400);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Email and password are required");
        assert!(body.get("session").is_none());
    }

    #[tokio::test]
    async fn test_register_invalid_email_is_400() {
        let (router, _provider, _repo) = auth_app();

        let response = send_json(
            &router,
            "POST",
            "/register",
            None,
            Some(json!({ "email": "not-an-email", "password": "password123" })),
        )
        .await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_passes_provider_message() {
        let (router, _provider, _repo) = auth_app();

        register(&router, "alice@example.com", "password123").await;

        let response = send_json(
            &router,
            "POST",
            "/register",
            None,
            Some(json!({ "email": "alice@example.com", "password": "password123" })),
        )
        .await;
        assert_eq!(response.status(), 400);

        let body = body_json(response).await;
        assert_eq!(body["error"], "User already registered");
    }

    #[tokio::test]
    async fn test_register_survives_profile_provisioning_failure() {
        let provider = MemoryProvider::default();
        let repo = MemoryProfiles::failing_writes();
        let router = crate::presentation::router::auth_router_generic(provider, repo);

        // Identity account is created even though the profile insert fails
        let (_user_id, token) = register(&router, "carol@example.com", "password123").await;

        // /me falls back to the bare identity record (no username field)
        let body = body_json(send_json(&router, "GET", "/me", Some(&token), None).await).await;
        assert!(body["user"]["id"].is_string());
        assert!(body["user"].get("username").is_none());
    }
}

mod login_tests {
    use super::support::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_roundtrip() {
        let (router, _provider, _repo) = auth_app();

        register(&router, "alice@example.com", "password123").await;

        let response = send_json(
            &router,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "password123" })),
        )
        .await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        let token = body["session"]["access_token"].as_str().unwrap();

        // The fresh token works against /me
        let me = send_json(&router, "GET", "/me", Some(token), None).await;
        assert_eq!(me.status(), 200);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let (router, _provider, _repo) = auth_app();

        register(&router, "alice@example.com", "password123").await;

        let response = send_json(
            &router,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "wrong" })),
        )
        .await;
        assert_eq!(response.status(), 401);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_login_missing_fields_is_400() {
        let (router, _provider, _repo) = auth_app();

        let response = send_json(
            &router,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "alice@example.com" })),
        )
        .await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_login_unknown_account_is_401() {
        let (router, _provider, _repo) = auth_app();

        let response = send_json(
            &router,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "password123" })),
        )
        .await;
        assert_eq!(response.status(), 401);
    }
}

mod session_tests {
    use super::support::*;

    #[tokio::test]
    async fn test_me_without_token_is_401() {
        let (router, _provider, _repo) = auth_app();

        let response = send_json(&router, "GET", "/me", None, None).await;
        assert_eq!(response.status(), 401);

        let body = body_json(response).await;
        assert_eq!(body["error"], "No authorization token provided");
    }

    #[tokio::test]
    async fn test_me_with_bad_token_is_401() {
        let (router, _provider, _repo) = auth_app();

        let response = send_json(&router, "GET", "/me", Some("garbage"), None).await;
        assert_eq!(response.status(), 401);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_logout_without_token_succeeds() {
        let (router, _provider, _repo) = auth_app();

        let response = send_json(&router, "POST", "/logout", None, None).await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Logged out successfully");
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let (router, _provider, _repo) = auth_app();

        let (_user_id, token) = register(&router, "alice@example.com", "password123").await;

        let response = send_json(&router, "POST", "/logout", Some(&token), None).await;
        assert_eq!(response.status(), 200);

        let response = send_json(&router, "GET", "/me", Some(&token), None).await;
        assert_eq!(response.status(), 401);
    }
}

mod users_tests {
    use super::support::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_unknown_profile_is_404() {
        let provider = MemoryProvider::default();
        let repo = MemoryProfiles::default();
        let router = users_app(provider, repo);

        let response = send_json(
            &router,
            "GET",
            &format!("/{}", uuid::Uuid::new_v4()),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), 404);

        let body = body_json(response).await;
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn test_get_profile_garbage_id_is_404() {
        let users = users_app(MemoryProvider::default(), MemoryProfiles::default());

        let response = send_json(&users, "GET", "/not-a-uuid", None, None).await;
        assert_eq!(response.status(), 404);

        let body = body_json(response).await;
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn test_get_profile_is_public() {
        let (auth, provider, repo) = auth_app();
        let (user_id, _token) = register(&auth, "alice@example.com", "password123").await;

        let users = users_app(provider, repo);

        // No bearer token on the lookup
        let response = send_json(&users, "GET", &format!("/{user_id}"), None, None).await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["user"]["username"], "alice");
    }

    #[tokio::test]
    async fn test_update_profile_requires_auth() {
        let users = users_app(MemoryProvider::default(), MemoryProfiles::default());

        let response = send_json(
            &users,
            "PUT",
            "/profile",
            None,
            Some(json!({ "bio": "hello" })),
        )
        .await;
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn test_update_profile_changes_own_row() {
        let (auth, provider, repo) = auth_app();
        let (user_id, token) = register(&auth, "alice@example.com", "password123").await;

        let users = users_app(provider, repo);

        let response = send_json(
            &users,
            "PUT",
            "/profile",
            Some(&token),
            Some(json!({ "username": "AliceShop", "bio": "handmade goods" })),
        )
        .await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["user"]["id"].as_str().unwrap(), user_id);
        assert_eq!(body["user"]["username"], "AliceShop");
        assert_eq!(body["user"]["bio"], "handmade goods");
    }

    #[tokio::test]
    async fn test_update_subscription_validates_plan() {
        let (auth, provider, repo) = auth_app();
        let (_user_id, token) = register(&auth, "alice@example.com", "password123").await;

        let users = users_app(provider, repo);

        let response = send_json(
            &users,
            "PUT",
            "/subscription",
            Some(&token),
            Some(json!({ "subscription_plan": "platinum" })),
        )
        .await;
        assert_eq!(response.status(), 400);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid subscription plan");

        let response = send_json(
            &users,
            "PUT",
            "/subscription",
            Some(&token),
            Some(json!({ "subscription_plan": "premium" })),
        )
        .await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["user"]["subscription_plan"], "premium");
    }

    #[tokio::test]
    async fn test_update_subscription_missing_plan_is_400() {
        let (auth, provider, repo) = auth_app();
        let (_user_id, token) = register(&auth, "alice@example.com", "password123").await;

        let users = users_app(provider, repo);

        let response =
            send_json(&users, "PUT", "/subscription", Some(&token), Some(json!({}))).await;
        assert_eq!(response.status(), 400);
    }
}
