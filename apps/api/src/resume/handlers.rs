use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::sections::{extract_sections, SectionOutcome};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub workspace_id: Uuid,
    pub structured: bool,
    pub sections: SectionOutcome,
}

async fn store_resume(state: &AppState, id: Uuid, text: &str) -> Result<ResumeResponse, AppError> {
    let outcome = extract_sections(text);
    let structured = outcome.sections().is_some();
    let sections_found = outcome.sections().map_or(0, |m| m.len());

    state
        .sessions
        .with_workspace(id, |ws| ws.resume = Some(outcome.clone()))
        .await?;

    info!(workspace_id = %id, structured, sections_found, "Resume stored");
    Ok(ResumeResponse {
        workspace_id: id,
        structured,
        sections: outcome,
    })
}

/// POST /api/v1/workspaces/:id/resume
/// Multipart upload; the document travels in the `file` field.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ResumeResponse>, AppError> {
    // Fail fast on unknown workspaces before reading the body
    state.sessions.get(id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let text = state.decoder.decode(&file_name, bytes.to_vec()).await?;
        return Ok(Json(store_resume(&state, id, &text.joined()).await?));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

/// POST /api/v1/workspaces/:id/resume/text
pub async fn handle_resume_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResumeTextRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    Ok(Json(store_resume(&state, id, &req.text).await?))
}
