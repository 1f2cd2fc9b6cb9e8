//! Counter Tracking Use Cases
//!
//! Public endpoints. The repository increments are single atomic UPDATE
//! statements, so N concurrent calls move a counter by exactly N. An
//! unknown-but-well-formed id is acknowledged without effect, matching the
//! remote-procedure semantics this replaces.

use std::sync::Arc;

use kernel::id::PromotionId;
use uuid::Uuid;

use crate::domain::repository::PromotionRepository;
use crate::error::{PromotionError, PromotionResult};

/// Tracking use case
pub struct TrackingUseCase<R>
where
    R: PromotionRepository,
{
    repo: Arc<R>,
}

impl<R> TrackingUseCase<R>
where
    R: PromotionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Record one impression
    pub async fn impression(&self, id: &str) -> PromotionResult<()> {
        let id = parse_promotion_id(id)?;

        let matched = self.repo.increment_impressions(id).await?;
        if matched == 0 {
            tracing::debug!(promotion_id = %id, "Impression for unknown promotion");
        }

        Ok(())
    }

    /// Record one click
    pub async fn click(&self, id: &str) -> PromotionResult<()> {
        let id = parse_promotion_id(id)?;

        let matched = self.repo.increment_clicks(id).await?;
        if matched == 0 {
            tracing::debug!(promotion_id = %id, "Click for unknown promotion");
        }

        Ok(())
    }
}

fn parse_promotion_id(value: &str) -> PromotionResult<PromotionId> {
    let uuid = Uuid::parse_str(value.trim())
        .map_err(|_| PromotionError::Validation("Invalid promotion ID".to_string()))?;
    Ok(PromotionId::from_uuid(uuid))
}
