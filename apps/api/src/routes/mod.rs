pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::corpus::handlers as corpus;
use crate::interview::handlers as interview;
use crate::matching::handlers as matching;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Corpus
        .route("/api/v1/roles", get(corpus::handle_list_roles))
        .route(
            "/api/v1/dataset/insights",
            get(corpus::handle_dataset_insights),
        )
        // Workspaces
        .route(
            "/api/v1/workspaces",
            post(interview::handle_create_workspace),
        )
        .route(
            "/api/v1/workspaces/:id",
            get(interview::handle_get_workspace).delete(interview::handle_delete_workspace),
        )
        // Resume intake and matching
        .route(
            "/api/v1/workspaces/:id/resume",
            post(resume::handle_upload_resume),
        )
        .route(
            "/api/v1/workspaces/:id/resume/text",
            post(resume::handle_resume_text),
        )
        .route(
            "/api/v1/workspaces/:id/matches",
            get(matching::handle_matches),
        )
        // Interview
        .route(
            "/api/v1/workspaces/:id/interview/start",
            post(interview::handle_start_interview),
        )
        .route(
            "/api/v1/workspaces/:id/interview/answer",
            post(interview::handle_submit_answer),
        )
        .route(
            "/api/v1/workspaces/:id/export/transcript",
            get(interview::handle_export_transcript),
        )
        .route(
            "/api/v1/workspaces/:id/export/summary",
            get(interview::handle_export_summary),
        )
        .route(
            "/api/v1/workspaces/:id/export/report",
            get(interview::handle_export_report),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
