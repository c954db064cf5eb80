//! Weight-profile and rating operations over a `TrackerStore`.
//!
//! Every input is validated before anything is read or written, so a rejected
//! request never touches stored state.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::excitement::evaluator::{evaluate, parse_notes};
use crate::excitement::weights::WeightSettings;
use crate::excitement::{Category, CategoryScores, ExcitementRating, Ranking, WeightProfile};
use crate::store::TrackerStore;

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// The caller's profile and whether it was ever saved explicitly.
pub async fn load_weights(
    store: &dyn TrackerStore,
    user_id: Uuid,
) -> Result<WeightSettings, AppError> {
    let user = store.find_user(user_id).await?.ok_or_else(user_not_found)?;
    Ok(WeightSettings::new(
        user.excitement_weights,
        user.weights_customized,
    ))
}

/// Validates `candidate` and replaces the stored profile with it.
/// Ratings already stored keep the overall score they were computed with.
pub async fn replace_weights(
    store: &dyn TrackerStore,
    user_id: Uuid,
    candidate: &BTreeMap<String, Value>,
) -> Result<WeightSettings, AppError> {
    let weights = WeightProfile::from_candidate(candidate)?;
    store_weights(store, user_id, weights).await
}

/// Derives a profile from a full ranking of the categories and stores it.
pub async fn replace_weights_from_ranking(
    store: &dyn TrackerStore,
    user_id: Uuid,
    ranking: &[String],
) -> Result<WeightSettings, AppError> {
    let weights = Ranking::parse(ranking)?.weights().validated()?;
    store_weights(store, user_id, weights).await
}

/// Which way a category moves in the ranking editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Moves one category a single step in the caller's current ranking and
/// re-derives all seven weights from the new order.
pub async fn move_category(
    store: &dyn TrackerStore,
    user_id: Uuid,
    category: &str,
    direction: MoveDirection,
) -> Result<WeightSettings, AppError> {
    let category: Category = category.parse()?;
    let current = load_weights(store, user_id).await?;

    let mut ranking = current.ranking;
    let index = ranking.position(category);
    let moved = match direction {
        MoveDirection::Up => ranking.move_up(index),
        MoveDirection::Down => ranking.move_down(index),
    };
    if !moved {
        let edge = match direction {
            MoveDirection::Up => "first",
            MoveDirection::Down => "last",
        };
        return Err(AppError::Validation(format!(
            "'{category}' is already ranked {edge}"
        )));
    }

    store_weights(store, user_id, ranking.weights().validated()?).await
}

async fn store_weights(
    store: &dyn TrackerStore,
    user_id: Uuid,
    weights: WeightProfile,
) -> Result<WeightSettings, AppError> {
    if !store.save_weights(user_id, &weights).await? {
        return Err(user_not_found());
    }
    info!("Updated excitement weights for user {user_id}");
    Ok(WeightSettings::new(weights, true))
}

/// Scores one of the caller's processes and replaces its rating.
pub async fn rate_process(
    store: &dyn TrackerStore,
    user_id: Uuid,
    process_id: Uuid,
    scores: &BTreeMap<String, Value>,
    notes: Option<BTreeMap<String, String>>,
) -> Result<ExcitementRating, AppError> {
    let scores = CategoryScores::from_candidate(scores)?;
    let notes = parse_notes(notes)?;

    let weights = store
        .find_user(user_id)
        .await?
        .map(|u| u.excitement_weights)
        .unwrap_or_default();

    if store.find_process(user_id, process_id).await?.is_none() {
        return Err(process_not_found());
    }

    let rating = evaluate(scores, notes, &weights, Utc::now());
    if !store
        .save_excitement_rating(user_id, process_id, &rating)
        .await?
    {
        return Err(process_not_found());
    }

    info!(
        "Rated process {process_id} at {:.2} for user {user_id}",
        rating.overall_score
    );
    Ok(rating)
}

fn process_not_found() -> AppError {
    AppError::NotFound("Process not found".to_string())
}
