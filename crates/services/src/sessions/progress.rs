use serde::Serialize;

use quiz_core::model::{EndReason, QuestionId, Session, SessionStatus};

/// Aggregated view of session progress, pushed to the UI on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub status: SessionStatus,
    pub end_reason: Option<EndReason>,
    pub correct: usize,
    pub total: usize,
    pub question_count: usize,
    pub remaining_secs: u32,
    /// Answered question ids, oldest first.
    pub answered: Vec<QuestionId>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn from_session(session: &Session, generation: u64) -> Self {
        Self {
            generation,
            status: session.status(),
            end_reason: session.end_reason(),
            correct: session.correct_count(),
            total: session.total_count(),
            question_count: session.questions().len(),
            remaining_secs: session.remaining_secs(),
            answered: session.answered_ids().collect(),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.status == SessionStatus::Ended
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::from_session(&Session::not_started(), 0)
    }
}
