use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::ranker::{score_roles, RoleScore};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    /// True when no resume is stored and `roles` lists every corpus title instead.
    pub fallback: bool,
    pub roles: Vec<String>,
    pub scores: Vec<RoleScore>,
}

/// GET /api/v1/workspaces/:id/matches
pub async fn handle_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<MatchQuery>,
) -> Result<Json<MatchResponse>, AppError> {
    let workspace = state.sessions.get(id).await?;

    let Some(resume) = workspace.resume else {
        return Ok(Json(MatchResponse {
            fallback: true,
            roles: state.corpus.distinct_titles(),
            scores: Vec::new(),
        }));
    };

    let top_n = params.top_n.unwrap_or(state.config.top_n);
    let corpus = state.corpus.clone();
    let resume_text = resume.flatten();
    let scores = tokio::task::spawn_blocking(move || score_roles(&resume_text, &corpus, top_n))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("ranking task failed: {e}")))?;

    Ok(Json(MatchResponse {
        fallback: false,
        roles: scores.iter().map(|s| s.role.clone()).collect(),
        scores,
    }))
}
