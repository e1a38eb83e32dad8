use axum::{extract::State, Json};
use serde::Serialize;

use crate::corpus::insights::{dataset_insights, DatasetInsights};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<String>,
    pub total_postings: usize,
    pub diagnostic: Option<String>,
}

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.corpus.distinct_titles(),
        total_postings: state.corpus.len(),
        diagnostic: state.corpus_diagnostic.clone(),
    })
}

/// GET /api/v1/dataset/insights
pub async fn handle_dataset_insights(
    State(state): State<AppState>,
) -> Result<Json<DatasetInsights>, AppError> {
    dataset_insights(&state.corpus)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No data".to_string()))
}
