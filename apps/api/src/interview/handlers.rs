use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::export::{
    format_full_report, format_section_summary, format_transcript, NOTHING_TO_EXPORT,
};
use crate::interview::question_bank::ExperienceLevel;
use crate::interview::session::{SessionState, SubmitOutcome, Turn};
use crate::interview::store::CandidateWorkspace;
use crate::resume::sections::SectionOutcome;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WorkspaceView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume: Option<SectionOutcome>,
    pub state: SessionState,
    pub role: Option<String>,
    pub current_question: Option<String>,
    pub remaining_questions: usize,
    pub log: Vec<Turn>,
}

impl From<CandidateWorkspace> for WorkspaceView {
    fn from(ws: CandidateWorkspace) -> Self {
        WorkspaceView {
            id: ws.id,
            created_at: ws.created_at,
            state: ws.session.state(),
            role: ws.session.selected_role().map(str::to_string),
            current_question: ws.session.current_question().map(str::to_string),
            remaining_questions: ws.session.remaining(),
            log: ws.session.log().to_vec(),
            resume: ws.resume,
        }
    }
}

/// POST /api/v1/workspaces
pub async fn handle_create_workspace(
    State(state): State<AppState>,
) -> (StatusCode, Json<WorkspaceView>) {
    let workspace = state.sessions.create().await;
    (StatusCode::CREATED, Json(workspace.into()))
}

/// GET /api/v1/workspaces/:id
pub async fn handle_get_workspace(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkspaceView>, AppError> {
    Ok(Json(state.sessions.get(id).await?.into()))
}

/// DELETE /api/v1/workspaces/:id
pub async fn handle_delete_workspace(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    pub role: String,
    pub level: Option<ExperienceLevel>,
}

#[derive(Debug, Serialize)]
pub struct InterviewStatus {
    pub state: SessionState,
    pub role: Option<String>,
    pub current_question: Option<String>,
    pub remaining_questions: usize,
}

/// POST /api/v1/workspaces/:id/interview/start
/// Questions come from the level bank when `level` is given, otherwise from the
/// corpus descriptions filed under `role`.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StartInterviewRequest>,
) -> Result<Json<InterviewStatus>, AppError> {
    let role = req.role.trim().to_string();
    if role.is_empty() {
        return Err(AppError::Validation("Role is required".to_string()));
    }

    let questions = match req.level {
        Some(level) => {
            let bank = state.question_bank.as_ref().ok_or_else(|| {
                AppError::Validation("No question bank is configured".to_string())
            })?;
            bank.questions(level).to_vec()
        }
        None => state.corpus.questions_for(&role),
    };
    let question_count = questions.len();

    let status = state
        .sessions
        .with_workspace(id, |ws| {
            ws.session.start(role.clone(), questions);
            InterviewStatus {
                state: ws.session.state(),
                role: ws.session.selected_role().map(str::to_string),
                current_question: ws.session.current_question().map(str::to_string),
                remaining_questions: ws.session.remaining(),
            }
        })
        .await?;

    info!(workspace_id = %id, %role, level = ?req.level, question_count, "Interview started");
    Ok(Json(status))
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// POST /api/v1/workspaces/:id/interview/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SubmitOutcome>, AppError> {
    let outcome = state
        .sessions
        .with_workspace(id, |ws| ws.session.submit_answer(&req.answer))
        .await??;

    if outcome == SubmitOutcome::Completed {
        info!(workspace_id = %id, "Interview completed");
    }
    Ok(Json(outcome))
}

#[derive(Debug, Clone, Copy)]
enum ExportKind {
    Transcript,
    Summary,
    Report,
}

impl ExportKind {
    fn file_name(&self) -> &'static str {
        match self {
            ExportKind::Transcript | ExportKind::Report => "interview_summary.txt",
            ExportKind::Summary => "resume_summary.txt",
        }
    }
}

async fn export(state: &AppState, id: Uuid, kind: ExportKind) -> Result<Response, AppError> {
    let ws = state.sessions.get(id).await?;
    let log = ws.session.log();
    if log.is_empty() {
        return Err(AppError::NotFound(NOTHING_TO_EXPORT.to_string()));
    }
    let resume = ws.resume.unwrap_or(SectionOutcome::NoStructuredData);

    let body = match kind {
        ExportKind::Transcript => format_transcript(log),
        ExportKind::Summary => format_section_summary(&resume),
        ExportKind::Report => format_full_report(log, &resume),
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}

/// GET /api/v1/workspaces/:id/export/transcript
pub async fn handle_export_transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    export(&state, id, ExportKind::Transcript).await
}

/// GET /api/v1/workspaces/:id/export/summary
pub async fn handle_export_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    export(&state, id, ExportKind::Summary).await
}

/// GET /api/v1/workspaces/:id/export/report
pub async fn handle_export_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    export(&state, id, ExportKind::Report).await
}
