pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::extract::handlers::handle_extract;
use crate::prompts::handlers::{handle_create_prompt, handle_get_prompts, handle_update_prompt};
use crate::render::handlers::handle_render_report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis
        .route("/api/analyze", post(handle_analyze))
        .route("/api/extract", post(handle_extract))
        // Reports
        .route("/api/reports/:format", post(handle_render_report))
        // Prompt admin
        .route(
            "/api/admin/prompts",
            get(handle_get_prompts)
                .post(handle_create_prompt)
                .put(handle_update_prompt),
        )
        .with_state(state)
}
