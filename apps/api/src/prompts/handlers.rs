//! Axum route handlers for the prompt admin API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::{run_blocking, AppError, AppJson};
use crate::prompts::models::{CreatePromptRequest, PromptTemplate, UpdatePromptRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/admin/prompts[?type=active]
///
/// `type=active` returns the resolved template with its source and editability;
/// otherwise every known template, active first.
pub async fn handle_get_prompts(
    State(state): State<AppState>,
    Query(query): Query<PromptQuery>,
) -> Result<Response, AppError> {
    let resolver = state.resolver.clone();
    if query.kind.as_deref() == Some("active") {
        let active = run_blocking("prompt resolution", move || resolver.active_prompt()).await?;
        return Ok(Json(active).into_response());
    }
    let templates = run_blocking("prompt listing", move || resolver.list_templates()).await??;
    Ok(Json(templates).into_response())
}

/// POST /api/admin/prompts
pub async fn handle_create_prompt(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePromptRequest>,
) -> Result<(StatusCode, Json<PromptTemplate>), AppError> {
    if req.name.trim().is_empty() || req.content.trim().is_empty() {
        return Err(AppError::Validation(
            "name and content are required".to_string(),
        ));
    }

    let now = Utc::now();
    let template = PromptTemplate {
        id: String::new(),
        name: req.name,
        description: req.description.unwrap_or_default(),
        content: req.content,
        is_active: req.is_active.unwrap_or(false),
        created_at: now,
        updated_at: now,
    };

    let resolver = state.resolver.clone();
    let saved = run_blocking("prompt save", move || resolver.save(template)).await??;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/admin/prompts
///
/// Updates the currently active template in place; its id is preserved.
pub async fn handle_update_prompt(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdatePromptRequest>,
) -> Result<Json<PromptTemplate>, AppError> {
    if req.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
        return Err(AppError::Validation("prompt id is required".to_string()));
    }

    let resolver = state.resolver.clone();
    let updated = run_blocking("prompt update", move || resolver.update_active(req)).await??;
    Ok(Json(updated))
}
