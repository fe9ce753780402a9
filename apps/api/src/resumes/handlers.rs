//! Axum route handlers for the Resume API.
//!
//! Bodies are taken as raw JSON and run through `validation` so a 400 lists
//! every bad field rather than the first serde complaint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::routes::extract::ApiJson;
use crate::models::resume::Resume;
use crate::resumes::validation::{validate_draft, validate_patch};
use crate::state::AppState;

/// GET /api/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(state.resumes.list().await?))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(state.resumes.get(&id).await?))
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let draft = validate_draft(body)?;
    let resume = state.resumes.create(draft).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// PATCH /api/resumes/:id
///
/// Validation runs before the lookup, so a bad body on a missing id is a 400.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Resume>, AppError> {
    let patch = validate_patch(body)?;
    Ok(Json(state.resumes.update(&id, patch).await?))
}

/// DELETE /api/resumes/:id
///
/// Always 204: deleting an unknown id is a no-op.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.resumes.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
