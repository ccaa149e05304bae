use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{OptionId, Question, QuestionId};

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    NotStarted,
    Running,
    Ended,
}

/// Why a session left `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The user ended the session early.
    Finished,
    /// The countdown reached zero.
    TimedOut,
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of `Session::select_answer`. Every variant except `Accepted` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Accepted { is_correct: bool },
    AlreadyAnswered,
    NotRunning,
    UnknownQuestion,
    UnknownOption,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, AnswerOutcome::Accepted { .. })
    }
}

/// Result of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session not running; nothing changed.
    Idle,
    Ticked { remaining_secs: u32 },
    /// This tick drove the countdown to zero and ended the session.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    Finished,
    NotRunning,
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// A recorded, final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub option_id: OptionId,
    pub is_correct: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// All mutable state of one quiz run.
///
/// Answers are append-only while the session lives: the first accepted answer for a
/// question is final. Scores are always derived from `answers`, never cached.
#[derive(Debug, Clone, Default)]
pub struct Session {
    status: SessionStatus,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    answer_index: HashMap<QuestionId, usize>,
    remaining_secs: u32,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    end_reason: Option<EndReason>,
}

impl Session {
    /// A session that has not been started yet.
    #[must_use]
    pub fn not_started() -> Self {
        Self::default()
    }

    /// A fresh running session over `questions` with a full countdown.
    #[must_use]
    pub fn start(questions: Vec<Question>, session_secs: u32, started_at: DateTime<Utc>) -> Self {
        Self {
            status: SessionStatus::Running,
            questions,
            answers: Vec::new(),
            answer_index: HashMap::new(),
            remaining_secs: session_secs,
            started_at: Some(started_at),
            ended_at: None,
            end_reason: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Answers in the order they were given.
    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<&Answer> {
        self.answer_index.get(&id).map(|&idx| &self.answers[idx])
    }

    /// Ids of answered questions, oldest first.
    pub fn answered_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.answers.iter().map(|answer| answer.question_id)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_correct).count()
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Record `option_id` as the final answer for `question_id`.
    ///
    /// Only the first answer per question is kept, and only while running.
    pub fn select_answer(&mut self, question_id: QuestionId, option_id: OptionId) -> AnswerOutcome {
        if !self.is_running() {
            return AnswerOutcome::NotRunning;
        }
        if self.answer_index.contains_key(&question_id) {
            return AnswerOutcome::AlreadyAnswered;
        }
        let Some(question) = self.question(question_id) else {
            return AnswerOutcome::UnknownQuestion;
        };
        let Some(option) = question.option(option_id) else {
            return AnswerOutcome::UnknownOption;
        };

        let is_correct = option.is_correct();
        self.answer_index.insert(question_id, self.answers.len());
        self.answers.push(Answer {
            question_id,
            option_id,
            is_correct,
        });
        AnswerOutcome::Accepted { is_correct }
    }

    /// Advance the countdown by one second.
    ///
    /// Ends the session exactly once when the countdown hits zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.end(EndReason::TimedOut, now);
            return TickOutcome::TimedOut;
        }
        TickOutcome::Ticked {
            remaining_secs: self.remaining_secs,
        }
    }

    /// End a running session at the user's request. Answers and scores are kept.
    pub fn finish(&mut self, now: DateTime<Utc>) -> FinishOutcome {
        if !self.is_running() {
            return FinishOutcome::NotRunning;
        }
        self.end(EndReason::Finished, now);
        FinishOutcome::Finished
    }

    fn end(&mut self, reason: EndReason, now: DateTime<Utc>) {
        self.status = SessionStatus::Ended;
        self.end_reason = Some(reason);
        self.ended_at = Some(now);
    }

    /// Summary of an ended session; `None` until the session has ended.
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.status != SessionStatus::Ended {
            return None;
        }
        Some(SessionSummary {
            question_count: self.questions.len(),
            answered: self.total_count(),
            correct: self.correct_count(),
            started_at: self.started_at?,
            ended_at: self.ended_at?,
            end_reason: self.end_reason?,
        })
    }
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Aggregate result of an ended session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub question_count: usize,
    pub answered: usize,
    pub correct: usize,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub end_reason: EndReason,
}

impl SessionSummary {
    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.answered.saturating_sub(self.correct)
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.question_count.saturating_sub(self.answered)
    }
}
