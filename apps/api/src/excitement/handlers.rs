//! Axum route handlers for excitement weights and ratings.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::excitement::service::{self, MoveDirection};
use crate::excitement::weights::{WeightSettings, RANK_WEIGHTS};
use crate::excitement::{Category, ExcitementRating, ScoreBand};
use crate::state::AppState;

const WEIGHTS_UPDATED: &str = "Excitement weights updated successfully";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Kept untyped so validation can name the offending key.
#[derive(Debug, Deserialize)]
pub struct UpdateWeightsRequest {
    pub weights: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRankingRequest {
    pub ranking: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCategoryRequest {
    pub category: String,
    pub direction: MoveDirection,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub key: Category,
    pub label: &'static str,
    pub default_weight: f64,
}

#[derive(Debug, Serialize)]
pub struct WeightsUpdatedResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub settings: WeightSettings,
}

#[derive(Debug, Deserialize)]
pub struct RateProcessRequest {
    pub scores: BTreeMap<String, Value>,
    pub notes: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateProcessResponse {
    pub excitement_rating: ExcitementRating,
    pub excitement_band: ScoreBand,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/excitement/categories
///
/// The seven categories in default order with their display labels.
pub async fn handle_list_categories() -> Json<Vec<CategoryInfo>> {
    let categories = Category::ALL
        .into_iter()
        .zip(RANK_WEIGHTS)
        .map(|(key, default_weight)| CategoryInfo {
            key,
            label: key.label(),
            default_weight,
        })
        .collect();
    Json(categories)
}

/// GET /api/auth/excitement-weights
///
/// Returns the stored profile, or the defaults if none was ever saved.
pub async fn handle_get_weights(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<WeightSettings>, AppError> {
    let settings = service::load_weights(state.store.as_ref(), auth.user_id).await?;
    Ok(Json(settings))
}

/// PUT /api/auth/excitement-weights
pub async fn handle_update_weights(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<UpdateWeightsRequest>,
) -> Result<Json<WeightsUpdatedResponse>, AppError> {
    let settings =
        service::replace_weights(state.store.as_ref(), auth.user_id, &request.weights).await?;
    Ok(Json(WeightsUpdatedResponse {
        message: WEIGHTS_UPDATED,
        settings,
    }))
}

/// PUT /api/auth/excitement-weights/ranking
///
/// Takes all seven category keys, most important first.
pub async fn handle_update_ranking(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<UpdateRankingRequest>,
) -> Result<Json<WeightsUpdatedResponse>, AppError> {
    let settings =
        service::replace_weights_from_ranking(state.store.as_ref(), auth.user_id, &request.ranking)
            .await?;
    Ok(Json(WeightsUpdatedResponse {
        message: WEIGHTS_UPDATED,
        settings,
    }))
}

/// PUT /api/auth/excitement-weights/move
///
/// Moves one category a single step up or down the current ranking.
pub async fn handle_move_category(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<MoveCategoryRequest>,
) -> Result<Json<WeightsUpdatedResponse>, AppError> {
    let settings = service::move_category(
        state.store.as_ref(),
        auth.user_id,
        &request.category,
        request.direction,
    )
    .await?;
    Ok(Json(WeightsUpdatedResponse {
        message: WEIGHTS_UPDATED,
        settings,
    }))
}

/// PUT /api/processes/:id/excitement
pub async fn handle_rate_process(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(process_id): Path<Uuid>,
    AppJson(request): AppJson<RateProcessRequest>,
) -> Result<Json<RateProcessResponse>, AppError> {
    let rating = service::rate_process(
        state.store.as_ref(),
        auth.user_id,
        process_id,
        &request.scores,
        request.notes,
    )
    .await?;

    Ok(Json(RateProcessResponse {
        excitement_band: ScoreBand::for_score(rating.overall_score),
        excitement_rating: rating,
    }))
}
