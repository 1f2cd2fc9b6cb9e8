//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog::models::ProductDto;

use crate::domain::entity::promotion::{Promotion, PromotionStatus, PromotionWithProduct};

// ============================================================================
// Promotions
// ============================================================================

/// Promotion as returned by the promotions endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PromotionDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub budget: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PromotionStatus,
    pub clicks: i32,
    pub impressions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined promoted product (listing/lookup endpoints only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDto>,
}

impl From<Promotion> for PromotionDto {
    fn from(promotion: Promotion) -> Self {
        Self {
            id: promotion.id.into_uuid(),
            user_id: promotion.user_id.into_uuid(),
            product_id: promotion.product_id.into_uuid(),
            title: promotion.title,
            description: promotion.description,
            budget: promotion.budget,
            start_date: promotion.start_date,
            end_date: promotion.end_date,
            status: promotion.status,
            clicks: promotion.clicks,
            impressions: promotion.impressions,
            created_at: promotion.created_at,
            updated_at: promotion.updated_at,
            product: None,
        }
    }
}

impl From<PromotionWithProduct> for PromotionDto {
    fn from(joined: PromotionWithProduct) -> Self {
        let mut dto = PromotionDto::from(joined.promotion);
        dto.product = joined.product.map(Into::into);
        dto
    }
}

/// Promotion create request (presence is validated in the use case)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePromotionRequest {
    /// Kept as a string so a malformed id answers 400 JSON
    pub product_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    /// ISO `YYYY-MM-DD`
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Promotion update request (all fields optional; `None` = leave unchanged)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePromotionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromotionsResponse {
    pub promotions: Vec<PromotionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromotionResponse {
    pub promotion: PromotionDto,
}

// ============================================================================
// Generic
// ============================================================================

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
