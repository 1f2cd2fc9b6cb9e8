//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ProductId, PromotionId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use catalog::models::Product;

use crate::domain::entity::promotion::{
    NewPromotion, Promotion, PromotionChanges, PromotionWithProduct,
};
use crate::domain::repository::PromotionRepository;
use crate::error::PromotionResult;

/// PostgreSQL-backed promotion repository
#[derive(Clone)]
pub struct PgPromotionRepository {
    pool: PgPool,
}

impl PgPromotionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PromotionRepository for PgPromotionRepository {
    async fn list_for_user(&self, user_id: UserId) -> PromotionResult<Vec<PromotionWithProduct>> {
        let rows = sqlx::query_as::<_, PromotionProductRow>(
            r#"
            SELECT
                pm.id, pm.user_id, pm.product_id, pm.title, pm.description,
                pm.budget, pm.start_date, pm.end_date, pm.status,
                pm.clicks, pm.impressions, pm.created_at, pm.updated_at,
                p.id AS p_id,
                p.user_id AS p_user_id,
                p.title AS p_title,
                p.image_url AS p_image_url,
                p.description AS p_description,
                p.category AS p_category,
                p.tags AS p_tags,
                p.store_url AS p_store_url,
                p.price AS p_price,
                p.created_at AS p_created_at,
                p.updated_at AS p_updated_at
            FROM promotions pm
            LEFT JOIN products p ON p.id = pm.product_id
            WHERE pm.user_id = $1
            ORDER BY pm.created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(PromotionProductRow::into_joined)
            .collect())
    }

    async fn find_owned(
        &self,
        id: PromotionId,
        owner: UserId,
    ) -> PromotionResult<Option<PromotionWithProduct>> {
        let row = sqlx::query_as::<_, PromotionProductRow>(
            r#"
            SELECT
                pm.id, pm.user_id, pm.product_id, pm.title, pm.description,
                pm.budget, pm.start_date, pm.end_date, pm.status,
                pm.clicks, pm.impressions, pm.created_at, pm.updated_at,
                p.id AS p_id,
                p.user_id AS p_user_id,
                p.title AS p_title,
                p.image_url AS p_image_url,
                p.description AS p_description,
                p.category AS p_category,
                p.tags AS p_tags,
                p.store_url AS p_store_url,
                p.price AS p_price,
                p.created_at AS p_created_at,
                p.updated_at AS p_updated_at
            FROM promotions pm
            LEFT JOIN products p ON p.id = pm.product_id
            WHERE pm.id = $1 AND pm.user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PromotionProductRow::into_joined))
    }

    async fn insert(&self, new: &NewPromotion) -> PromotionResult<Promotion> {
        let row = sqlx::query_as::<_, PromotionRow>(
            r#"
            INSERT INTO promotions (
                user_id,
                product_id,
                title,
                description,
                budget,
                start_date,
                end_date,
                status,
                clicks,
                impressions
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', 0, 0)
            RETURNING
                id, user_id, product_id, title, description,
                budget, start_date, end_date, status,
                clicks, impressions, created_at, updated_at
            "#,
        )
        .bind(new.user_id.as_uuid())
        .bind(new.product_id.as_uuid())
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.budget)
        .bind(new.start_date)
        .bind(new.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_promotion())
    }

    async fn update_owned(
        &self,
        id: PromotionId,
        owner: UserId,
        changes: &PromotionChanges,
    ) -> PromotionResult<Option<Promotion>> {
        let row = sqlx::query_as::<_, PromotionRow>(
            r#"
            UPDATE promotions SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                budget = COALESCE($5, budget),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                status = COALESCE($8, status),
                updated_at = $9
            WHERE id = $1 AND user_id = $2
            RETURNING
                id, user_id, product_id, title, description,
                budget, start_date, end_date, status,
                clicks, impressions, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.budget)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PromotionRow::into_promotion))
    }

    async fn delete_owned(&self, id: PromotionId, owner: UserId) -> PromotionResult<u64> {
        let deleted = sqlx::query("DELETE FROM promotions WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn increment_impressions(&self, id: PromotionId) -> PromotionResult<u64> {
        let matched =
            sqlx::query("UPDATE promotions SET impressions = impressions + 1 WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(matched)
    }

    async fn increment_clicks(&self, id: PromotionId) -> PromotionResult<u64> {
        let matched = sqlx::query("UPDATE promotions SET clicks = clicks + 1 WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(matched)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PromotionRow {
    id: Uuid,
    user_id: Uuid,
    product_id: Uuid,
    title: String,
    description: Option<String>,
    budget: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
    clicks: i32,
    impressions: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PromotionRow {
    fn into_promotion(self) -> Promotion {
        Promotion {
            id: PromotionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            product_id: ProductId::from_uuid(self.product_id),
            title: self.title,
            description: self.description,
            budget: self.budget,
            start_date: self.start_date,
            end_date: self.end_date,
            // Column is CHECK-constrained; an unknown value can only mean a
            // schema drift, fall back to the default status
            status: self.status.parse().unwrap_or_default(),
            clicks: self.clicks,
            impressions: self.impressions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PromotionProductRow {
    #[sqlx(flatten)]
    promotion: PromotionRow,
    p_id: Option<Uuid>,
    p_user_id: Option<Uuid>,
    p_title: Option<String>,
    p_image_url: Option<String>,
    p_description: Option<String>,
    p_category: Option<String>,
    p_tags: Option<Vec<String>>,
    p_store_url: Option<String>,
    p_price: Option<f64>,
    p_created_at: Option<DateTime<Utc>>,
    p_updated_at: Option<DateTime<Utc>>,
}

impl PromotionProductRow {
    fn into_joined(self) -> PromotionWithProduct {
        let product = match (
            self.p_id,
            self.p_user_id,
            self.p_title,
            self.p_image_url,
            self.p_created_at,
            self.p_updated_at,
        ) {
            (Some(id), Some(user_id), Some(title), Some(image_url), Some(created), Some(updated)) => {
                Some(Product {
                    id: ProductId::from_uuid(id),
                    user_id: UserId::from_uuid(user_id),
                    title,
                    image_url,
                    description: self.p_description,
                    category: self.p_category,
                    tags: self.p_tags,
                    store_url: self.p_store_url,
                    price: self.p_price,
                    created_at: created,
                    updated_at: updated,
                })
            }
            _ => None,
        };

        PromotionWithProduct {
            promotion: self.promotion.into_promotion(),
            product,
        }
    }
}
