//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use auth::presentation::middleware::CurrentUser;
use kernel::id::PromotionId;

use crate::application::{
    CreatePromotionInput, PromotionsUseCase, TrackingUseCase, UpdatePromotionInput,
};
use crate::domain::repository::PromotionRepository;
use crate::error::{PromotionError, PromotionResult};
use crate::presentation::dto::{
    CreatePromotionRequest, MessageResponse, PromotionResponse, PromotionsResponse,
    UpdatePromotionRequest,
};

/// Shared state for promotion handlers
#[derive(Clone)]
pub struct PromotionAppState<R>
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// ============================================================================
// CRUD (owner-scoped)
// ============================================================================

/// GET /api/promotions (requires authentication)
pub async fn list_promotions<R>(
    State(state): State<PromotionAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> PromotionResult<Json<PromotionsResponse>>
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
{
    let use_case = PromotionsUseCase::new(state.repo.clone());

    let promotions = use_case.list(current.id).await?;

    Ok(Json(PromotionsResponse {
        promotions: promotions.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/promotions/{id} (requires authentication, owner only)
pub async fn get_promotion<R>(
    State(state): State<PromotionAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> PromotionResult<Json<PromotionResponse>>
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
{
    let use_case = PromotionsUseCase::new(state.repo.clone());

    // A non-UUID path segment can only be an unknown promotion
    let id = Uuid::parse_str(&id).map_err(|_| PromotionError::PromotionNotFound)?;

    let promotion = use_case
        .get(current.id, PromotionId::from_uuid(id))
        .await?;

    Ok(Json(PromotionResponse {
        promotion: promotion.into(),
    }))
}

/// POST /api/promotions (requires authentication)
pub async fn create_promotion<R>(
    State(state): State<PromotionAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreatePromotionRequest>,
) -> PromotionResult<impl IntoResponse>
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
{
    let use_case = PromotionsUseCase::new(state.repo.clone());

    let input = CreatePromotionInput {
        product_id: req.product_id,
        title: req.title,
        description: req.description,
        budget: req.budget,
        start_date: req.start_date,
        end_date: req.end_date,
    };

    let promotion = use_case.create(current.id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(PromotionResponse {
            promotion: promotion.into(),
        }),
    ))
}

/// PUT /api/promotions/{id} (requires authentication, owner only)
pub async fn update_promotion<R>(
    State(state): State<PromotionAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePromotionRequest>,
) -> PromotionResult<Json<PromotionResponse>>
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
{
    let use_case = PromotionsUseCase::new(state.repo.clone());

    let id = parse_promotion_path_id(&id)?;

    let input = UpdatePromotionInput {
        title: req.title,
        description: req.description,
        budget: req.budget,
        start_date: req.start_date,
        end_date: req.end_date,
        status: req.status,
    };

    let promotion = use_case.update(current.id, id, input).await?;

    Ok(Json(PromotionResponse {
        promotion: promotion.into(),
    }))
}

/// DELETE /api/promotions/{id} (requires authentication, owner only)
pub async fn delete_promotion<R>(
    State(state): State<PromotionAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> PromotionResult<Json<MessageResponse>>
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
{
    let use_case = PromotionsUseCase::new(state.repo.clone());

    let id = parse_promotion_path_id(&id)?;

    use_case.delete(current.id, id).await?;

    Ok(Json(MessageResponse::new("Promotion deleted successfully")))
}

// ============================================================================
// Tracking (public)
// ============================================================================

/// POST /api/promotions/{id}/impression
pub async fn track_impression<R>(
    State(state): State<PromotionAppState<R>>,
    Path(id): Path<String>,
) -> PromotionResult<Json<MessageResponse>>
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
{
    let use_case = TrackingUseCase::new(state.repo.clone());

    use_case.impression(&id).await?;

    Ok(Json(MessageResponse::new("Impression tracked")))
}

/// POST /api/promotions/{id}/click
pub async fn track_click<R>(
    State(state): State<PromotionAppState<R>>,
    Path(id): Path<String>,
) -> PromotionResult<Json<MessageResponse>>
where
    R: PromotionRepository + Clone + Send + Sync + 'static,
{
    let use_case = TrackingUseCase::new(state.repo.clone());

    use_case.click(&id).await?;

    Ok(Json(MessageResponse::new("Click tracked")))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_promotion_path_id(id: &str) -> PromotionResult<PromotionId> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| PromotionError::Validation("Invalid promotion ID".to_string()))?;
    Ok(PromotionId::from_uuid(uuid))
}
