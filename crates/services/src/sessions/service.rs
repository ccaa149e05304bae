use std::fmt;

use quiz_core::model::{
    AnswerOutcome, FinishOutcome, OptionId, QuestionId, QuizSettings, Session, SessionSummary,
    TickOutcome,
};
use quiz_core::{BankError, BankFormat, BankIssue, Clock, audit, parse_bank_with};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::plan::SessionBuilder;
use super::progress::SessionSnapshot;
use super::view::QuestionView;

//
// ─── BANK REPORT ───────────────────────────────────────────────────────────────
//

/// What a bank load found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankReport {
    pub questions: usize,
    pub issues: Vec<BankIssue>,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the current quiz session and routes every mutation through named operations.
///
/// Operations that don't apply in the current state are no-ops; their outcome enum
/// says what happened. The countdown itself is driven from outside via `tick_for`,
/// see `QuizRunner`.
pub struct QuizSession {
    settings: QuizSettings,
    format: BankFormat,
    clock: Clock,
    rng: Box<dyn RngCore + Send>,
    bank_text: Option<String>,
    bank_size: usize,
    session: Session,
    generation: u64,
}

impl QuizSession {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            settings,
            format: BankFormat::default(),
            clock: Clock::system(),
            rng: Box::new(StdRng::from_os_rng()),
            bank_text: None,
            bank_size: 0,
            session: Session::not_started(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: BankFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Counter bumped by every start; ticks from older generations are ignored.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn has_bank(&self) -> bool {
        self.bank_text.is_some()
    }

    /// Questions in the loaded bank, before selection.
    #[must_use]
    pub fn bank_size(&self) -> usize {
        self.bank_size
    }

    /// Install the raw bank text used by subsequent starts.
    ///
    /// Questions with zero or several correct options are logged. They are kept
    /// unless `strict_bank` is set.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Malformed` in strict mode when any question is degenerate;
    /// the previously loaded bank stays in place.
    pub fn load_bank(&mut self, text: impl Into<String>) -> Result<BankReport, BankError> {
        let text = text.into();
        let questions = parse_bank_with(&self.format, &text);
        let issues = audit(&questions);

        for issue in &issues {
            tracing::warn!(
                position = issue.position,
                kind = ?issue.kind,
                "degenerate question in bank"
            );
        }

        if self.settings.strict_bank() && !issues.is_empty() {
            return Err(BankError::Malformed { issues });
        }

        tracing::info!(questions = questions.len(), issues = issues.len(), "question bank loaded");
        self.bank_size = questions.len();
        self.bank_text = Some(text);
        Ok(BankReport {
            questions: self.bank_size,
            issues,
        })
    }

    /// Begin a new session, discarding the current one whatever its state.
    ///
    /// Re-parses the bank and draws a fresh working set, so question ids and
    /// orders differ from the previous session. Returns the new generation.
    pub fn start(&mut self) -> u64 {
        let questions = self
            .bank_text
            .as_deref()
            .map(|text| parse_bank_with(&self.format, text))
            .unwrap_or_default();
        if questions.is_empty() {
            tracing::warn!("starting session without any questions");
        }

        let plan = SessionBuilder::from_settings(&self.settings).build(questions, &mut *self.rng);
        self.generation += 1;
        self.session = Session::start(plan.questions, self.settings.session_secs(), self.clock.now());

        tracing::info!(
            generation = self.generation,
            questions = self.session.questions().len(),
            bank_size = plan.bank_size,
            secs = self.settings.session_secs(),
            "session started"
        );
        self.generation
    }

    /// Same as `start`; kept as a separate name for the UI's restart intent.
    pub fn restart(&mut self) -> u64 {
        self.start()
    }

    /// End the running session now.
    pub fn finish(&mut self) -> FinishOutcome {
        let outcome = self.session.finish(self.clock.now());
        match outcome {
            FinishOutcome::Finished => self.log_end(),
            FinishOutcome::NotRunning => tracing::debug!("finish ignored: session not running"),
        }
        outcome
    }

    pub fn select_answer(&mut self, question_id: QuestionId, option_id: OptionId) -> AnswerOutcome {
        let outcome = self.session.select_answer(question_id, option_id);
        if outcome.is_accepted() {
            tracing::debug!(%question_id, %option_id, ?outcome, "answer recorded");
        } else {
            tracing::debug!(%question_id, %option_id, ?outcome, "answer ignored");
        }
        outcome
    }

    /// Tick the current generation's countdown.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_for(self.generation)
    }

    /// Tick on behalf of the timer started for `generation`.
    pub fn tick_for(&mut self, generation: u64) -> TickOutcome {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale tick ignored");
            return TickOutcome::Idle;
        }
        let outcome = self.session.tick(self.clock.now());
        if outcome == TickOutcome::TimedOut {
            self.log_end();
        }
        outcome
    }

    fn log_end(&self) {
        tracing::info!(
            generation = self.generation,
            reason = ?self.session.end_reason(),
            correct = self.session.correct_count(),
            total = self.session.total_count(),
            "session ended"
        );
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_session(&self.session, self.generation)
    }

    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        self.session.summary()
    }

    /// Every question of the working set, in display order.
    #[must_use]
    pub fn question_views(&self) -> Vec<QuestionView> {
        self.session
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                QuestionView::from_question(index, question, self.session.answer_for(question.id()))
            })
            .collect()
    }

    /// The question at zero-based `index` of the working set.
    #[must_use]
    pub fn jump_to(&self, index: usize) -> Option<QuestionView> {
        let question = self.session.questions().get(index)?;
        Some(QuestionView::from_question(
            index,
            question,
            self.session.answer_for(question.id()),
        ))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("settings", &self.settings)
            .field("bank_size", &self.bank_size)
            .field("generation", &self.generation)
            .field("status", &self.session.status())
            .field("remaining_secs", &self.session.remaining_secs())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
