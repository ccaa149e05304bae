use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("max questions must be > 0")]
    InvalidMaxQuestions,

    #[error("session length must be > 0 seconds")]
    InvalidSessionSeconds,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Default cap on the working set.
pub const DEFAULT_MAX_QUESTIONS: u32 = 50;

/// Default session length: twenty minutes.
pub const DEFAULT_SESSION_SECS: u32 = 20 * 60;

/// Configuration for quiz sessions.
///
/// Controls how many questions a session draws and how long it may run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    max_questions: u32,
    session_secs: u32,
    strict_bank: bool,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            session_secs: DEFAULT_SESSION_SECS,
            strict_bank: false,
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns error if `max_questions` or `session_secs` is zero.
    pub fn new(max_questions: u32, session_secs: u32, strict_bank: bool) -> Result<Self, SettingsError> {
        if max_questions == 0 {
            return Err(SettingsError::InvalidMaxQuestions);
        }
        if session_secs == 0 {
            return Err(SettingsError::InvalidSessionSeconds);
        }

        Ok(Self {
            max_questions,
            session_secs,
            strict_bank,
        })
    }

    /// Upper bound on questions per session.
    #[must_use]
    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    /// Countdown length, in ticks of one second.
    #[must_use]
    pub fn session_secs(&self) -> u32 {
        self.session_secs
    }

    /// When set, banks with degenerate questions are rejected at load time.
    #[must_use]
    pub fn strict_bank(&self) -> bool {
        self.strict_bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_twenty_minute_fifty_question_quiz() {
        let settings = QuizSettings::default();
        assert_eq!(settings.max_questions(), 50);
        assert_eq!(settings.session_secs(), 1200);
        assert!(!settings.strict_bank());
    }

    #[test]
    fn zero_values_are_rejected() {
        assert_eq!(
            QuizSettings::new(0, 60, false).unwrap_err(),
            SettingsError::InvalidMaxQuestions
        );
        assert_eq!(
            QuizSettings::new(10, 0, false).unwrap_err(),
            SettingsError::InvalidSessionSeconds
        );
    }

    #[test]
    fn custom_settings_roundtrip() {
        let settings = QuizSettings::new(5, 90, true).unwrap();
        assert_eq!(settings.max_questions(), 5);
        assert_eq!(settings.session_secs(), 90);
        assert!(settings.strict_bank());
    }
}
