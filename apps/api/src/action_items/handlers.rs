//! Axum route handlers for action items. Ownership always resolves through
//! the parent process.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::action_item::{ActionItem, ActionItemUpdate, NewActionItem};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Action item not found".to_string())
}

/// POST /api/action-items
pub async fn handle_create_action_item(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<NewActionItem>,
) -> Result<(StatusCode, Json<ActionItem>), AppError> {
    let item = request.into_item(Utc::now())?;
    if !state.store.insert_action_item(auth.user_id, &item).await? {
        return Err(AppError::NotFound("Process not found".to_string()));
    }
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/action-items/:id
pub async fn handle_update_action_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<Uuid>,
    AppJson(update): AppJson<ActionItemUpdate>,
) -> Result<Json<ActionItem>, AppError> {
    let mut item = state
        .store
        .find_action_item(auth.user_id, item_id)
        .await?
        .ok_or_else(not_found)?;

    update.apply(&mut item, Utc::now())?;
    if !state.store.save_action_item(auth.user_id, &item).await? {
        return Err(not_found());
    }
    Ok(Json(item))
}

/// DELETE /api/action-items/:id
pub async fn handle_delete_action_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_action_item(auth.user_id, item_id).await? {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
