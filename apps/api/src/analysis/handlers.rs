//! Axum route handler for the analysis API.

use axum::{extract::State, Json};

use crate::analysis::analyzer::run_analysis;
use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::errors::{AppError, AppJson};
use crate::state::AppState;

/// POST /api/analyze
///
/// Sends the reviews to the model using the active prompt and returns the decoded result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AppJson(request): AppJson<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = run_analysis(&request, &state.resolver, state.model.as_ref()).await?;
    Ok(Json(result))
}
