use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use quiz_core::model::{AnswerOutcome, FinishOutcome, OptionId, QuestionId, SessionSummary, TickOutcome};
use storage::BankSource;

use super::progress::SessionSnapshot;
use super::service::{BankReport, QuizSession};
use super::timer::Ticker;
use super::view::QuestionView;
use crate::error::RunnerError;

/// Drives a `QuizSession` from a bank source and a one-second ticker.
///
/// Every operation locks the session, mutates it and releases the lock without
/// awaiting, so user intents and ticks are applied one at a time. Each change is
/// published as a `SessionSnapshot` on a watch channel.
pub struct QuizRunner {
    session: Arc<Mutex<QuizSession>>,
    ticker: Mutex<Ticker>,
    source: Arc<dyn BankSource>,
    updates: Arc<watch::Sender<SessionSnapshot>>,
}

impl QuizRunner {
    #[must_use]
    pub fn new(session: QuizSession, source: Arc<dyn BankSource>) -> Self {
        Self::with_ticker(session, source, Ticker::default())
    }

    #[must_use]
    pub fn with_ticker(session: QuizSession, source: Arc<dyn BankSource>, ticker: Ticker) -> Self {
        let (updates, _) = watch::channel(session.snapshot());
        Self {
            session: Arc::new(Mutex::new(session)),
            ticker: Mutex::new(ticker),
            source,
            updates: Arc::new(updates),
        }
    }

    /// Fetch the bank from the source and install it.
    ///
    /// Failures are logged and returned; the runner keeps whatever bank it had,
    /// which is none at all if no fetch has succeeded yet.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Storage` if the fetch fails and `RunnerError::Bank`
    /// if a strict-mode bank is rejected.
    pub async fn load_bank(&self) -> Result<BankReport, RunnerError> {
        let location = self.source.describe();
        let text = match self.source.fetch().await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(%location, error = %err, "failed to fetch question bank");
                return Err(err.into());
            }
        };

        let report = lock(&self.session).load_bank(text).map_err(|err| {
            tracing::error!(%location, error = %err, "question bank rejected");
            err
        })?;
        self.publish();
        Ok(report)
    }

    /// Start (or restart) a session and its countdown.
    ///
    /// The previous tick task is aborted before the new session exists. Must be
    /// called from within a tokio runtime.
    pub fn start(&self) -> u64 {
        let mut ticker = lock(&self.ticker);
        ticker.cancel();

        let generation = lock(&self.session).start();
        self.publish();

        let session = Arc::clone(&self.session);
        let updates = Arc::clone(&self.updates);
        ticker.start(move || {
            let mut guard = lock(&session);
            match guard.tick_for(generation) {
                TickOutcome::Ticked { .. } => {
                    updates.send_replace(guard.snapshot());
                    ControlFlow::Continue(())
                }
                TickOutcome::TimedOut => {
                    updates.send_replace(guard.snapshot());
                    ControlFlow::Break(())
                }
                TickOutcome::Idle => ControlFlow::Break(()),
            }
        });
        generation
    }

    pub fn restart(&self) -> u64 {
        self.start()
    }

    /// End the running session now and stop its countdown.
    pub fn finish(&self) -> FinishOutcome {
        let mut ticker = lock(&self.ticker);
        ticker.cancel();
        let outcome = lock(&self.session).finish();
        if outcome == FinishOutcome::Finished {
            self.publish();
        }
        outcome
    }

    pub fn select_answer(&self, question_id: QuestionId, option_id: OptionId) -> AnswerOutcome {
        let outcome = lock(&self.session).select_answer(question_id, option_id);
        if outcome.is_accepted() {
            self.publish();
        }
        outcome
    }

    /// Receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.session).snapshot()
    }

    #[must_use]
    pub fn question_views(&self) -> Vec<QuestionView> {
        lock(&self.session).question_views()
    }

    #[must_use]
    pub fn jump_to(&self, index: usize) -> Option<QuestionView> {
        lock(&self.session).jump_to(index)
    }

    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        lock(&self.session).summary()
    }

    /// Whether a countdown task is currently scheduled.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        lock(&self.ticker).is_active()
    }

    /// Read-only access to the controller.
    pub fn inspect<R>(&self, f: impl FnOnce(&QuizSession) -> R) -> R {
        f(&lock(&self.session))
    }

    fn publish(&self) {
        let snapshot = lock(&self.session).snapshot();
        self.updates.send_replace(snapshot);
    }
}

// Mutations are single calls on `QuizSession`, so a poisoned lock still guards a
// consistent session.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
