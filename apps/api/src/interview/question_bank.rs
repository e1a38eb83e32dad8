//! Generic interview questions keyed by experience level, loaded from JSON:
//! `{ "entry": [...], "mid": [...], "senior": [...] }`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

#[derive(Debug, Error)]
pub enum QuestionBankError {
    #[error("Failed to read question bank '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid question bank JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Question bank has no questions for level '{0}'")]
    MissingLevel(&'static str),
}

/// Validated bank: every level has at least one non-blank question.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: HashMap<ExperienceLevel, Vec<String>>,
}

impl QuestionBank {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuestionBankError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| QuestionBankError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, QuestionBankError> {
        let parsed: HashMap<ExperienceLevel, Vec<String>> = serde_json::from_str(raw)?;

        let mut questions = HashMap::new();
        for level in ExperienceLevel::ALL {
            let list: Vec<String> = parsed
                .get(&level)
                .map(|qs| {
                    qs.iter()
                        .map(|q| q.trim())
                        .filter(|q| !q.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            if list.is_empty() {
                return Err(QuestionBankError::MissingLevel(level.as_str()));
            }
            questions.insert(level, list);
        }

        Ok(Self { questions })
    }

    pub fn questions(&self, level: ExperienceLevel) -> &[String] {
        self.questions.get(&level).map(Vec::as_slice).unwrap_or_default()
    }
}
