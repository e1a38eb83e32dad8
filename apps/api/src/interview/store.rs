//! In-memory candidate workspaces. One workspace per logical user; lives for the
//! lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::InterviewSession;
use crate::resume::sections::SectionOutcome;

#[derive(Debug, Clone)]
pub struct CandidateWorkspace {
    pub id: Uuid,
    pub resume: Option<SectionOutcome>,
    pub session: InterviewSession,
    pub created_at: DateTime<Utc>,
}

impl CandidateWorkspace {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            resume: None,
            session: InterviewSession::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, CandidateWorkspace>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> CandidateWorkspace {
        let workspace = CandidateWorkspace::new();
        self.inner
            .write()
            .await
            .insert(workspace.id, workspace.clone());
        info!(workspace_id = %workspace.id, "Workspace created");
        workspace
    }

    /// Snapshot of the workspace.
    pub async fn get(&self, id: Uuid) -> Result<CandidateWorkspace, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Runs `f` against the workspace under the write lock.
    pub async fn with_workspace<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut CandidateWorkspace) -> T,
    ) -> Result<T, AppError> {
        let mut map = self.inner.write().await;
        let workspace = map.get_mut(&id).ok_or_else(|| not_found(id))?;
        Ok(f(workspace))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| info!(workspace_id = %id, "Workspace removed"))
            .ok_or_else(|| not_found(id))
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Workspace {id} not found"))
}
