//! Axum route handlers for the AI content API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::routes::extract::ApiJson;
use crate::generation::gateway::{GenerationContext, GenerationKind};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub context: GenerationContext,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub content: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub content: String,
}

fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(format!("Invalid request: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai/generate
///
/// The generation type is resolved before anything is sent upstream.
/// Structured kinds (`skills`, `complete`) come back as JSON text in `content`.
pub async fn handle_generate(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<ContentResponse>, AppError> {
    let request: GenerateRequest = decode(body)?;
    let kind: GenerationKind = request
        .kind
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("type is required".to_string()))?
        .parse()?;

    let content = state
        .gateway
        .generate(kind, &request.context)
        .await?
        .into_text()?;

    Ok(Json(ContentResponse { content }))
}

/// POST /api/ai/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<ContentResponse>, AppError> {
    let request: ImproveRequest = decode(body)?;
    let content = request
        .content
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Content is required".to_string()))?;

    let content = state
        .gateway
        .improve(content, request.context.as_deref())
        .await?;

    Ok(Json(ContentResponse { content }))
}
