//! Promotion CRUD Use Cases
//!
//! Every operation is scoped to the authenticated owner through the
//! repository's single-statement `id AND user_id` filters.

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::id::{ProductId, PromotionId, UserId};
use uuid::Uuid;

use crate::domain::entity::promotion::{
    NewPromotion, Promotion, PromotionChanges, PromotionStatus, PromotionWithProduct,
};
use crate::domain::repository::PromotionRepository;
use crate::error::{PromotionError, PromotionResult};

/// Raw input for a promotion create
#[derive(Debug, Default)]
pub struct CreatePromotionInput {
    pub product_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Raw input for a promotion update (all fields optional)
#[derive(Debug, Default)]
pub struct UpdatePromotionInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// Promotions use case
pub struct PromotionsUseCase<R>
where
    R: PromotionRepository,
{
    repo: Arc<R>,
}

impl<R> PromotionsUseCase<R>
where
    R: PromotionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Caller's campaigns, newest first
    pub async fn list(&self, caller: UserId) -> PromotionResult<Vec<PromotionWithProduct>> {
        self.repo.list_for_user(caller).await
    }

    /// One campaign the caller owns
    pub async fn get(&self, caller: UserId, id: PromotionId) -> PromotionResult<PromotionWithProduct> {
        self.repo
            .find_owned(id, caller)
            .await?
            .ok_or(PromotionError::PromotionNotFound)
    }

    /// Create a campaign; it always starts `active` with zeroed counters
    pub async fn create(
        &self,
        caller: UserId,
        input: CreatePromotionInput,
    ) -> PromotionResult<Promotion> {
        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let budget = input.budget.filter(|b| *b > 0.0);

        let (Some(product_id), Some(title), Some(budget), Some(start_date), Some(end_date)) = (
            input.product_id.as_deref(),
            title,
            budget,
            input.start_date.as_deref(),
            input.end_date.as_deref(),
        ) else {
            return Err(PromotionError::MissingFields);
        };

        let new = NewPromotion {
            user_id: caller,
            product_id: parse_product_id(product_id)?,
            title: title.to_string(),
            description: input.description,
            budget,
            start_date: parse_date(start_date)?,
            end_date: parse_date(end_date)?,
        };

        let promotion = self.repo.insert(&new).await?;

        tracing::info!(
            promotion_id = %promotion.id,
            user_id = %caller,
            "Promotion created"
        );

        Ok(promotion)
    }

    /// Update a campaign the caller owns
    pub async fn update(
        &self,
        caller: UserId,
        id: PromotionId,
        input: UpdatePromotionInput,
    ) -> PromotionResult<Promotion> {
        let status = input
            .status
            .as_deref()
            .map(|s| s.parse::<PromotionStatus>())
            .transpose()
            .map_err(|_| PromotionError::InvalidStatus)?;

        let changes = PromotionChanges {
            title: input.title,
            description: input.description,
            budget: input.budget,
            start_date: input.start_date.as_deref().map(parse_date).transpose()?,
            end_date: input.end_date.as_deref().map(parse_date).transpose()?,
            status,
        };

        self.repo
            .update_owned(id, caller, &changes)
            .await?
            .ok_or(PromotionError::NoRowMatched)
    }

    /// Delete a campaign the caller owns.
    ///
    /// Succeeds whether or not a row matched; no existence check is made.
    pub async fn delete(&self, caller: UserId, id: PromotionId) -> PromotionResult<()> {
        let deleted = self.repo.delete_owned(id, caller).await?;

        if deleted > 0 {
            tracing::info!(promotion_id = %id, user_id = %caller, "Promotion deleted");
        }

        Ok(())
    }
}

fn parse_product_id(value: &str) -> PromotionResult<ProductId> {
    let uuid = Uuid::parse_str(value.trim())
        .map_err(|_| PromotionError::Validation("Invalid product ID".to_string()))?;
    Ok(ProductId::from_uuid(uuid))
}

/// Dates arrive as ISO `YYYY-MM-DD` strings
fn parse_date(value: &str) -> PromotionResult<NaiveDate> {
    value
        .trim()
        .parse()
        .map_err(|_| PromotionError::Validation("Invalid date format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert!(parse_date("03/01/2026").is_err());
        assert!(parse_date("soon").is_err());
    }

    #[test]
    fn test_parse_product_id() {
        let uuid = Uuid::new_v4();
        assert_eq!(
            parse_product_id(&uuid.to_string()).unwrap().as_uuid(),
            &uuid
        );
        assert!(parse_product_id("garbage").is_err());
    }
}
