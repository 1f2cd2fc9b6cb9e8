//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user_profile::{ProfileChanges, UserProfile};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::subscription_plan::SubscriptionPlan;
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;

/// PostgreSQL-backed profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileRepository for PgProfileRepository {
    async fn create_if_absent(&self, profile: &UserProfile) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                username,
                avatar_url,
                bio,
                subscription_plan,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(&profile.email)
        .bind(profile.username.as_str())
        .bind(&profile.avatar_url)
        .bind(&profile.bio)
        .bind(profile.subscription_plan.as_str())
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                id,
                email,
                username,
                avatar_url,
                bio,
                subscription_plan,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                bio = COALESCE($3, bio),
                avatar_url = COALESCE($4, avatar_url),
                updated_at = $5
            WHERE id = $1
            RETURNING
                id,
                email,
                username,
                avatar_url,
                bio,
                subscription_plan,
                created_at,
                updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(changes.username.as_ref().map(Username::as_str))
        .bind(&changes.bio)
        .bind(&changes.avatar_url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn update_plan(
        &self,
        user_id: UserId,
        plan: SubscriptionPlan,
    ) -> AuthResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE users SET
                subscription_plan = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING
                id,
                email,
                username,
                avatar_url,
                bio,
                subscription_plan,
                created_at,
                updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(plan.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    email: Option<String>,
    username: String,
    avatar_url: Option<String>,
    bio: Option<String>,
    subscription_plan: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> UserProfile {
        UserProfile {
            id: UserId::from_uuid(self.id),
            email: self.email,
            username: Username::from_db(self.username),
            avatar_url: self.avatar_url,
            bio: self.bio,
            // Column is CHECK-constrained; an unknown value can only mean a
            // schema drift, fall back to the default tier
            subscription_plan: self.subscription_plan.parse().unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
