//! Interview session: a FIFO question queue driven by candidate answers.
//!
//! `Idle` until a role is started, `Started` while a question awaits an answer, and
//! `Completed` once the queue is exhausted. The log alternates interviewer and candidate
//! turns, always opening with the interviewer.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Started,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Interviewer,
    Candidate,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Interviewer => "Interviewer",
            Speaker::Candidate => "Candidate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// Rejected answer. The session is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Answer cannot be empty!")]
    EmptyAnswer,

    #[error("No question is waiting for an answer")]
    NoPendingQuestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "question", rename_all = "snake_case")]
pub enum SubmitOutcome {
    NextQuestion(String),
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct InterviewSession {
    queue: VecDeque<String>,
    log: Vec<Turn>,
    current_question: Option<String>,
    selected_role: Option<String>,
}

impl InterviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the session for `role`. Valid from any state.
    pub fn start(&mut self, role: impl Into<String>, questions: Vec<String>) {
        self.selected_role = Some(role.into());
        self.log.clear();
        self.queue = questions.into();
        self.current_question = None;
        self.advance();
    }

    pub fn submit_answer(&mut self, answer: &str) -> Result<SubmitOutcome, SessionError> {
        if self.current_question.is_none() {
            return Err(SessionError::NoPendingQuestion);
        }
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        self.log.push(Turn::new(Speaker::Candidate, answer));
        self.current_question = None;
        self.advance();

        Ok(match &self.current_question {
            Some(q) => SubmitOutcome::NextQuestion(q.clone()),
            None => SubmitOutcome::Completed,
        })
    }

    fn advance(&mut self) {
        if let Some(question) = self.queue.pop_front() {
            self.log.push(Turn::new(Speaker::Interviewer, question.clone()));
            self.current_question = Some(question);
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.selected_role, &self.current_question) {
            (None, _) => SessionState::Idle,
            (Some(_), Some(_)) => SessionState::Started,
            (Some(_), None) => SessionState::Completed,
        }
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    pub fn log(&self) -> &[Turn] {
        &self.log
    }

    pub fn selected_role(&self) -> Option<&str> {
        self.selected_role.as_deref()
    }

    /// Questions still queued behind the current one.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(qs: &[&str]) -> Vec<String> {
        qs.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = InterviewSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.log().is_empty());
        assert!(session.current_question().is_none());
        assert!(session.selected_role().is_none());
    }

    #[test]
    fn test_two_question_scenario() {
        let mut session = InterviewSession::new();
        session.start("Engineer", questions(&["Q1", "Q2"]));
        assert_eq!(session.state(), SessionState::Started);
        assert_eq!(session.current_question(), Some("Q1"));
        assert_eq!(session.remaining(), 1);

        assert_eq!(
            session.submit_answer("A1").unwrap(),
            SubmitOutcome::NextQuestion("Q2".to_string())
        );
        assert_eq!(session.submit_answer("A2").unwrap(), SubmitOutcome::Completed);

        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.current_question().is_none());
        assert_eq!(
            session.log(),
            &[
                Turn::new(Speaker::Interviewer, "Q1"),
                Turn::new(Speaker::Candidate, "A1"),
                Turn::new(Speaker::Interviewer, "Q2"),
                Turn::new(Speaker::Candidate, "A2"),
            ]
        );
    }

    #[test]
    fn test_start_with_no_questions_completes_immediately() {
        let mut session = InterviewSession::new();
        session.start("Engineer", Vec::new());
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.current_question().is_none());
        assert!(session.log().is_empty());
        assert_eq!(session.selected_role(), Some("Engineer"));
    }

    #[test]
    fn test_empty_answer_leaves_state_untouched() {
        let mut session = InterviewSession::new();
        session.start("Engineer", questions(&["Q1"]));

        for blank in ["", "   ", "\n\t"] {
            assert_eq!(session.submit_answer(blank), Err(SessionError::EmptyAnswer));
        }
        assert_eq!(session.current_question(), Some("Q1"));
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_answer_without_pending_question_is_rejected() {
        let mut idle = InterviewSession::new();
        assert_eq!(idle.submit_answer("hello"), Err(SessionError::NoPendingQuestion));
        assert_eq!(idle.state(), SessionState::Idle);

        let mut done = InterviewSession::new();
        done.start("Engineer", questions(&["Q1"]));
        done.submit_answer("A1").unwrap();
        assert_eq!(done.submit_answer("A2"), Err(SessionError::NoPendingQuestion));
        assert_eq!(done.log().len(), 2);
    }

    #[test]
    fn test_full_run_alternates_speakers() {
        let qs: Vec<String> = (1..=5).map(|i| format!("Question {i}")).collect();
        let mut session = InterviewSession::new();
        session.start("Analyst", qs.clone());
        for i in 0..qs.len() {
            session.submit_answer(&format!("Answer {i}")).unwrap();
        }

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.log().len(), 2 * qs.len());
        for (i, turn) in session.log().iter().enumerate() {
            let expected = if i % 2 == 0 { Speaker::Interviewer } else { Speaker::Candidate };
            assert_eq!(turn.speaker, expected);
        }
    }

    #[test]
    fn test_restart_resets_log_and_queue() {
        let mut session = InterviewSession::new();
        session.start("Engineer", questions(&["Q1", "Q2"]));
        session.submit_answer("A1").unwrap();

        session.start("Analyst", questions(&["Z1"]));
        assert_eq!(session.selected_role(), Some("Analyst"));
        assert_eq!(session.log(), &[Turn::new(Speaker::Interviewer, "Z1")]);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_duplicate_questions_are_not_filtered() {
        let mut session = InterviewSession::new();
        session.start("Engineer", questions(&["Same", "Same"]));
        assert_eq!(
            session.submit_answer("A").unwrap(),
            SubmitOutcome::NextQuestion("Same".to_string())
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SubmitOutcome::NextQuestion("Q2".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "next_question", "question": "Q2" }));
        let json = serde_json::to_value(SubmitOutcome::Completed).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "completed" }));
    }
}
