use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::template::Template;
use crate::state::AppState;

/// GET /api/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<Vec<Template>> {
    Json(state.templates.list().to_vec())
}

/// GET /api/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Template>, AppError> {
    let template = state.templates.get(&id)?;
    Ok(Json(template.clone()))
}
