//! Unit tests for promotions crate
//!
//! Router-level coverage runs against an in-memory repository and a static
//! token provider. The counter tests exercise the increment path under
//! concurrent calls.

mod support {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use chrono::{Duration, Utc};
    use tower::ServiceExt;
    use uuid::Uuid;

    use auth::domain::entity::identity::{IdentityUser, SignInData, SignUpData};
    use auth::domain::provider::IdentityProvider;
    use auth::domain::value_object::email::Email;
    use auth::error::{AuthError, AuthResult};
    use auth::presentation::middleware::AuthMiddlewareState;
    use kernel::id::{PromotionId, UserId};

    use crate::domain::entity::promotion::{
        NewPromotion, Promotion, PromotionChanges, PromotionStatus, PromotionWithProduct,
    };
    use crate::domain::repository::PromotionRepository;
    use crate::error::PromotionResult;

    /// Token-map identity provider double
    #[derive(Clone, Default)]
    pub struct StaticProvider {
        tokens: Arc<Mutex<HashMap<String, Uuid>>>,
    }

    impl StaticProvider {
        pub fn issue(&self, user_id: Uuid) -> String {
            let token = format!("token-{}", Uuid::new_v4());
            self.tokens.lock().unwrap().insert(token.clone(), user_id);
            token
        }
    }

    impl IdentityProvider for StaticProvider {
        async fn sign_up(&self, _email: &Email, _password: &str) -> AuthResult<SignUpData> {
            Err(AuthError::Provider("not supported".to_string()))
        }

        async fn sign_in(&self, _email: &str, _password: &str) -> AuthResult<SignInData> {
            Err(AuthError::InvalidCredentials)
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

    /// In-memory promotion repository double
    #[derive(Clone, Default)]
    pub struct MemoryPromotions {
        rows: Arc<Mutex<Vec<Promotion>>>,
        ticks: Arc<AtomicI64>,
    }

    impl MemoryPromotions {
        fn next_stamp(&self) -> chrono::DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            Utc::now() + Duration::microseconds(tick)
        }

        pub fn row(&self, id: PromotionId) -> Option<Promotion> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned()
        }
    }

    impl PromotionRepository for MemoryPromotions {
        async fn list_for_user(
            &self,
            user_id: UserId,
        ) -> PromotionResult<Vec<PromotionWithProduct>> {
            let mut rows: Vec<Promotion> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.user_id == user_id)
                .cloned()
                .collect();

            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            Ok(rows
                .into_iter()
                .map(|promotion| PromotionWithProduct {
                    promotion,
                    product: None,
                })
                .collect())
        }

        async fn find_owned(
            &self,
            id: PromotionId,
            owner: UserId,
        ) -> PromotionResult<Option<PromotionWithProduct>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id && p.user_id == owner)
                .cloned()
                .map(|promotion| PromotionWithProduct {
                    promotion,
                    product: None,
                }))
        }

        async fn insert(&self, new: &NewPromotion) -> PromotionResult<Promotion> {
            let now = self.next_stamp();

            let promotion = Promotion {
                id: PromotionId::new(),
                user_id: new.user_id,
                product_id: new.product_id,
                title: new.title.clone(),
                description: new.description.clone(),
                budget: new.budget,
                start_date: new.start_date,
                end_date: new.end_date,
                status: PromotionStatus::Active,
                clicks: 0,
                impressions: 0,
                created_at: now,
                updated_at: now,
            };

            self.rows.lock().unwrap().push(promotion.clone());

            Ok(promotion)
        }

        async fn update_owned(
            &self,
            id: PromotionId,
            owner: UserId,
            changes: &PromotionChanges,
        ) -> PromotionResult<Option<Promotion>> {
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|p| p.id == id && p.user_id == owner) else {
                return Ok(None);
            };

            if let Some(title) = &changes.title {
                row.title = title.clone();
            }
            if let Some(description) = &changes.description {
                row.description = Some(description.clone());
            }
            if let Some(budget) = changes.budget {
                row.budget = budget;
            }
            if let Some(start_date) = changes.start_date {
                row.start_date = start_date;
            }
            if let Some(end_date) = changes.end_date {
                row.end_date = end_date;
            }
            if let Some(status) = changes.status {
                row.status = status;
            }
            row.updated_at = Utc::now();

            Ok(Some(row.clone()))
        }

        async fn delete_owned(&self, id: PromotionId, owner: UserId) -> PromotionResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|p| !(p.id == id && p.user_id == owner));
            Ok((before - rows.len()) as u64)
        }

        async fn increment_impressions(&self, id: PromotionId) -> PromotionResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|p| p.id == id) {
                Some(row) => {
                    row.impressions += 1;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn increment_clicks(&self, id: PromotionId) -> PromotionResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|p| p.id == id) {
                Some(row) => {
                    row.clicks += 1;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    pub struct TestApp {
        pub router: Router,
        pub provider: StaticProvider,
        pub repo: MemoryPromotions,
    }

    pub fn test_app() -> TestApp {
        let provider = StaticProvider::default();
        let repo = MemoryPromotions::default();
        let auth = AuthMiddlewareState {
            provider: Arc::new(provider.clone()),
        };

        TestApp {
            router: crate::presentation::router::promotions_router_generic(repo.clone(), auth),
            provider,
            repo,
        }
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

    /// Create a promotion through the router; returns its id
    pub async fn create_promotion(app: &TestApp, token: &str, title: &str) -> String {
        let response = send_json(
            &app.router,
            "POST",
            "/",
            Some(token),
            Some(serde_json::json!({
                "product_id": Uuid::new_v4().to_string(),
                "title": title,
                "budget": 100.0,
                "start_date": "2026-08-01",
                "end_date": "2026-08-31"
            })),
        )
        .await;
        assert_eq!(response.status(), 201);

        let body = body_json(response).await;
        body["promotion"]["id"].as_str().unwrap().to_string()
    }
}

mod crud_tests {
    use super::support::*;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_listing_requires_auth() {
        let app = test_app();

        let response = send_json(&app.router, "GET", "/", None, None).await;
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn test_create_missing_fields_is_400() {
        let app = test_app();
        let token = app.provider.issue(Uuid::new_v4());

        let response = send_json(
            &app.router,
            "POST",
            "/",
            Some(&token),
            Some(json!({ "title": "Spring push" })),
        )
        .await;
        assert_eq!(response.status(), 400);

        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Product ID, title, budget, start date, and end date are required"
        );
    }

    #[tokio::test]
    async fn test_create_defaults_active_with_zeroed_counters() {
        let app = test_app();
        let token = app.provider.issue(Uuid::new_v4());

        let response = send_json(
            &app.router,
            "POST",
            "/",
            Some(&token),
            Some(json!({
                "product_id": Uuid::new_v4().to_string(),
                "title": "Launch week",
                "budget": 250.0,
                "start_date": "2026-09-01",
                "end_date": "2026-09-07"
            })),
        )
        .await;
        assert_eq!(response.status(), 201);

        let body = body_json(response).await;
        assert_eq!(body["promotion"]["status"], "active");
        assert_eq!(body["promotion"]["clicks"], 0);
        assert_eq!(body["promotion"]["impressions"], 0);
        assert_eq!(body["promotion"]["budget"], 250.0);
    }

    #[tokio::test]
    async fn test_create_bad_date_is_400() {
        let app = test_app();
        let token = app.provider.issue(Uuid::new_v4());

        let response = send_json(
            &app.router,
            "POST",
            "/",
            Some(&token),
            Some(json!({
                "product_id": Uuid::new_v4().to_string(),
                "title": "Launch week",
                "budget": 250.0,
                "start_date": "soon",
                "end_date": "2026-09-07"
            })),
        )
        .await;
        assert_eq!(response.status(), 400);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid date format");
    }

    #[tokio::test]
    async fn test_get_is_owner_scoped() {
        let app = test_app();
        let owner_token = app.provider.issue(Uuid::new_v4());
        let other_token = app.provider.issue(Uuid::new_v4());

        let id = create_promotion(&app, &owner_token, "Mine").await;

        let response = send_json(
            &app.router,
            "GET",
            &format!("/{id}"),
            Some(&owner_token),
            None,
        )
        .await;
        assert_eq!(response.status(), 200);

        // Someone else's campaign looks like it does not exist
        let response = send_json(
            &app.router,
            "GET",
            &format!("/{id}"),
            Some(&other_token),
            None,
        )
        .await;
        assert_eq!(response.status(), 404);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Promotion not found");
    }

    #[tokio::test]
    async fn test_listing_is_scoped_to_caller() {
        let app = test_app();
        let alice_token = app.provider.issue(Uuid::new_v4());
        let bob_token = app.provider.issue(Uuid::new_v4());

        create_promotion(&app, &alice_token, "Alice campaign").await;

        let body =
            body_json(send_json(&app.router, "GET", "/", Some(&bob_token), None).await).await;
        assert!(body["promotions"].as_array().unwrap().is_empty());

        let body =
            body_json(send_json(&app.router, "GET", "/", Some(&alice_token), None).await).await;
        assert_eq!(body["promotions"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_status_and_partial_fields() {
        let app = test_app();
        let token = app.provider.issue(Uuid::new_v4());

        let id = create_promotion(&app, &token, "Tunable").await;

        let response = send_json(
            &app.router,
            "PUT",
            &format!("/{id}"),
            Some(&token),
            Some(json!({ "status": "paused", "budget": 500.0 })),
        )
        .await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["promotion"]["status"], "paused");
        assert_eq!(body["promotion"]["budget"], 500.0);
        // Untouched field survives
        assert_eq!(body["promotion"]["title"], "Tunable");
    }

    #[tokio::test]
    async fn test_update_invalid_status_is_400() {
        let app = test_app();
        let token = app.provider.issue(Uuid::new_v4());

        let id = create_promotion(&app, &token, "Campaign").await;

        let response = send_json(
            &app.router,
            "PUT",
            &format!("/{id}"),
            Some(&token),
            Some(json!({ "status": "archived" })),
        )
        .await;
        assert_eq!(response.status(), 400);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid promotion status");
    }

    #[tokio::test]
    async fn test_foreign_owner_update_is_400() {
        let app = test_app();
        let owner_token = app.provider.issue(Uuid::new_v4());
        let other_token = app.provider.issue(Uuid::new_v4());

        let id = create_promotion(&app, &owner_token, "Untouchable").await;

        let response = send_json(
            &app.router,
            "PUT",
            &format!("/{id}"),
            Some(&other_token),
            Some(json!({ "title": "Hijacked" })),
        )
        .await;
        assert_eq!(response.status(), 400);

        // Row is unchanged
        let body = body_json(
            send_json(
                &app.router,
                "GET",
                &format!("/{id}"),
                Some(&owner_token),
                None,
            )
            .await,
        )
        .await;
        assert_eq!(body["promotion"]["title"], "Untouchable");
    }

    #[tokio::test]
    async fn test_delete_answers_message() {
        let app = test_app();
        let token = app.provider.issue(Uuid::new_v4());

        let id = create_promotion(&app, &token, "Done soon").await;

        let response = send_json(
            &app.router,
            "DELETE",
            &format!("/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Promotion deleted successfully");

        let response = send_json(&app.router, "GET", &format!("/{id}"), Some(&token), None).await;
        assert_eq!(response.status(), 404);
    }
}

mod tracking_tests {
    use super::support::*;
    use kernel::id::PromotionId;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_tracking_is_public() {
        let app = test_app();
        let token = app.provider.issue(Uuid::new_v4());

        let id = create_promotion(&app, &token, "Visible").await;

        // No bearer token on either call
        let response =
            send_json(&app.router, "POST", &format!("/{id}/impression"), None, None).await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Impression tracked");

        let response = send_json(&app.router, "POST", &format!("/{id}/click"), None, None).await;
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Click tracked");
    }

    #[tokio::test]
    async fn test_concurrent_impressions_increment_exactly_n() {
        let app = test_app();
        let token = app.provider.issue(Uuid::new_v4());

        let id = create_promotion(&app, &token, "Hot item").await;

        const N: usize = 25;

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..N {
            let router = app.router.clone();
            let uri = format!("/{id}/impression");
            tasks.spawn(async move {
                let response = send_json(&router, "POST", &uri, None, None).await;
                assert_eq!(response.status(), 200);
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap();
        }

        let promotion_id = PromotionId::from_uuid(Uuid::parse_str(&id).unwrap());
        let row = app.repo.row(promotion_id).unwrap();
        assert_eq!(row.impressions, N as i32);
        assert_eq!(row.clicks, 0);
    }

    #[tokio::test]
    async fn test_unknown_promotion_is_acknowledged() {
        let app = test_app();

        let response = send_json(
            &app.router,
            "POST",
            &format!("/{}/impression", Uuid::new_v4()),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_malformed_promotion_id_is_400() {
        let app = test_app();

        let response =
            send_json(&app.router, "POST", "/not-a-uuid/impression", None, None).await;
        assert_eq!(response.status(), 400);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid promotion ID");
    }
}
