//! Axum route handlers for recruitment processes.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::process::{NewProcess, ProcessDetail, ProcessStatus, ProcessUpdate};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    pub total: usize,
    pub by_status: BTreeMap<ProcessStatus, usize>,
}

impl ProcessSummary {
    fn from_processes(processes: &[ProcessDetail]) -> Self {
        let mut by_status: BTreeMap<ProcessStatus, usize> =
            ProcessStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for detail in processes {
            *by_status.entry(detail.process.status).or_default() += 1;
        }
        Self {
            total: processes.len(),
            by_status,
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Process not found".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/processes
///
/// Most recently updated first. `?status=OFFER` narrows to one status.
pub async fn handle_list_processes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProcessDetail>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<ProcessStatus>)
        .transpose()
        .map_err(AppError::Validation)?;

    let processes = state.store.list_processes(auth.user_id, status).await?;
    Ok(Json(processes))
}

/// GET /api/processes/summary
pub async fn handle_process_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProcessSummary>, AppError> {
    let processes = state.store.list_processes(auth.user_id, None).await?;
    Ok(Json(ProcessSummary::from_processes(&processes)))
}

/// POST /api/processes
pub async fn handle_create_process(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(request): AppJson<NewProcess>,
) -> Result<(StatusCode, Json<ProcessDetail>), AppError> {
    let process = request.into_process(auth.user_id, Utc::now())?;
    state.store.insert_process(&process).await?;

    info!("Created process {} ({})", process.id, process.company_name);
    Ok((
        StatusCode::CREATED,
        Json(ProcessDetail::new(process, Vec::new())),
    ))
}

/// GET /api/processes/:id
pub async fn handle_get_process(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(process_id): Path<Uuid>,
) -> Result<Json<ProcessDetail>, AppError> {
    let detail = state
        .store
        .find_process(auth.user_id, process_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(detail))
}

/// PUT /api/processes/:id
///
/// Partial update. The excitement rating has its own endpoint.
pub async fn handle_update_process(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(process_id): Path<Uuid>,
    AppJson(update): AppJson<ProcessUpdate>,
) -> Result<Json<ProcessDetail>, AppError> {
    let ProcessDetail {
        mut process,
        action_items,
        ..
    } = state
        .store
        .find_process(auth.user_id, process_id)
        .await?
        .ok_or_else(not_found)?;

    update.apply(&mut process, Utc::now())?;
    if !state.store.save_process(&process).await? {
        return Err(not_found());
    }

    Ok(Json(ProcessDetail::new(process, action_items)))
}

/// DELETE /api/processes/:id
///
/// Removes the process together with its action items and rating.
pub async fn handle_delete_process(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(process_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_process(auth.user_id, process_id).await? {
        return Err(not_found());
    }
    info!("Deleted process {process_id}");
    Ok(StatusCode::NO_CONTENT)
}
