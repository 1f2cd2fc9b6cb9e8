//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{FavoriteId, ProductId, UserId};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::favorite::{Favorite, FavoriteWithProduct};
use crate::domain::entity::product::{
    NewProduct, OwnerSummary, Product, ProductChanges, ProductFilter, ProductWithOwner,
};
use crate::domain::repository::{FavoriteRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};

/// Unique-violation code on the favorites (user_id, product_id) constraint
const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCatalogRepository {
    async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<ProductWithOwner>> {
        let mut query: QueryBuilder<'_, sqlx::Postgres> = QueryBuilder::new(
            r#"
            SELECT
                p.id, p.user_id, p.title, p.image_url, p.description,
                p.category, p.tags, p.store_url, p.price,
                p.created_at, p.updated_at,
                u.username AS owner_username,
                u.avatar_url AS owner_avatar_url
            FROM products p
            LEFT JOIN users u ON u.id = p.user_id
            "#,
        );

        let mut has_where = false;

        if let Some(search) = &filter.search {
            query.push(" WHERE p.title ILIKE ");
            query.push_bind(format!("%{}%", search));
            has_where = true;
        }

        if let Some(category) = &filter.category {
            query.push(if has_where { " AND " } else { " WHERE " });
            query.push("p.category = ");
            query.push_bind(category);
        }

        query.push(" ORDER BY p.created_at DESC LIMIT ");
        query.push_bind(filter.limit);
        query.push(" OFFSET ");
        query.push_bind(filter.offset);

        let rows: Vec<ProductOwnerRow> =
            query.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(ProductOwnerRow::into_joined).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<ProductWithOwner>> {
        let row = sqlx::query_as::<_, ProductOwnerRow>(
            r#"
            SELECT
                p.id, p.user_id, p.title, p.image_url, p.description,
                p.category, p.tags, p.store_url, p.price,
                p.created_at, p.updated_at,
                u.username AS owner_username,
                u.avatar_url AS owner_avatar_url
            FROM products p
            LEFT JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductOwnerRow::into_joined))
    }

    async fn list_by_user(&self, user_id: UserId) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id, user_id, title, image_url, description,
                category, tags, store_url, price,
                created_at, updated_at
            FROM products
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn insert(&self, new: &NewProduct) -> CatalogResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (
                user_id,
                title,
                image_url,
                description,
                category,
                tags,
                store_url,
                price
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, user_id, title, image_url, description,
                category, tags, store_url, price,
                created_at, updated_at
            "#,
        )
        .bind(new.user_id.as_uuid())
        .bind(&new.title)
        .bind(&new.image_url)
        .bind(&new.description)
        .bind(&new.category)
        .bind(&new.tags)
        .bind(&new.store_url)
        .bind(new.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_product())
    }

    async fn update_owned(
        &self,
        id: ProductId,
        owner: UserId,
        changes: &ProductChanges,
    ) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                image_url = COALESCE($5, image_url),
                category = COALESCE($6, category),
                tags = COALESCE($7, tags),
                store_url = COALESCE($8, store_url),
                price = COALESCE($9, price),
                updated_at = $10
            WHERE id = $1 AND user_id = $2
            RETURNING
                id, user_id, title, image_url, description,
                category, tags, store_url, price,
                created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.image_url)
        .bind(&changes.category)
        .bind(&changes.tags)
        .bind(&changes.store_url)
        .bind(changes.price)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn delete_owned(&self, id: ProductId, owner: UserId) -> CatalogResult<u64> {
        let deleted = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Favorite Repository Implementation
// ============================================================================

impl FavoriteRepository for PgCatalogRepository {
    async fn list_for_user(&self, user_id: UserId) -> CatalogResult<Vec<FavoriteWithProduct>> {
        let rows = sqlx::query_as::<_, FavoriteProductRow>(
            r#"
            SELECT
                f.id, f.user_id, f.product_id, f.created_at,
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
                p.updated_at AS p_updated_at,
                u.username AS owner_username,
                u.avatar_url AS owner_avatar_url
            FROM favorites f
            LEFT JOIN products p ON p.id = f.product_id
            LEFT JOIN users u ON u.id = p.user_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(FavoriteProductRow::into_joined)
            .collect())
    }

    async fn insert(&self, user_id: UserId, product_id: ProductId) -> CatalogResult<Favorite> {
        let result = sqlx::query_as::<_, FavoriteRow>(
            r#"
            INSERT INTO favorites (user_id, product_id)
            VALUES ($1, $2)
            RETURNING id, user_id, product_id, created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(product_id.as_uuid())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into_favorite()),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) =>
            {
                Err(CatalogError::AlreadyFavorited)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, user_id: UserId, product_id: ProductId) -> CatalogResult<u64> {
        let deleted =
            sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
                .bind(user_id.as_uuid())
                .bind(product_id.as_uuid())
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(deleted)
    }

    async fn exists(&self, user_id: UserId, product_id: ProductId) -> CatalogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND product_id = $2)",
        )
        .bind(user_id.as_uuid())
        .bind(product_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    image_url: String,
    description: Option<String>,
    category: Option<String>,
    tags: Option<Vec<String>>,
    store_url: Option<String>,
    price: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            title: self.title,
            image_url: self.image_url,
            description: self.description,
            category: self.category,
            tags: self.tags,
            store_url: self.store_url,
            price: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductOwnerRow {
    #[sqlx(flatten)]
    product: ProductRow,
    owner_username: Option<String>,
    owner_avatar_url: Option<String>,
}

impl ProductOwnerRow {
    fn into_joined(self) -> ProductWithOwner {
        let owner = self.owner_username.map(|username| OwnerSummary {
            username,
            avatar_url: self.owner_avatar_url,
        });

        ProductWithOwner {
            product: self.product.into_product(),
            owner,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: Uuid,
    user_id: Uuid,
    product_id: Uuid,
    created_at: DateTime<Utc>,
}

impl FavoriteRow {
    fn into_favorite(self) -> Favorite {
        Favorite {
            id: FavoriteId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            product_id: ProductId::from_uuid(self.product_id),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FavoriteProductRow {
    #[sqlx(flatten)]
    favorite: FavoriteRow,
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
    owner_username: Option<String>,
    owner_avatar_url: Option<String>,
}

impl FavoriteProductRow {
    fn into_joined(self) -> FavoriteWithProduct {
        let product = match (
            self.p_id,
            self.p_user_id,
            self.p_title,
            self.p_image_url,
            self.p_created_at,
            self.p_updated_at,
        ) {
            (Some(id), Some(user_id), Some(title), Some(image_url), Some(created), Some(updated)) => {
                Some(ProductWithOwner {
                    product: Product {
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
                    },
                    owner: self.owner_username.map(|username| OwnerSummary {
                        username,
                        avatar_url: self.owner_avatar_url,
                    }),
                })
            }
            _ => None,
        };

        FavoriteWithProduct {
            favorite: self.favorite.into_favorite(),
            product,
        }
    }
}
