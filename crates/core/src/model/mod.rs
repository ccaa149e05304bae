mod ids;
mod question;
mod session;
mod settings;

pub use ids::{OptionId, ParseIdError, QuestionId};
pub use question::{AnswerOption, Question};
pub use session::{
    Answer, AnswerOutcome, EndReason, FinishOutcome, Session, SessionStatus, SessionSummary,
    TickOutcome,
};
pub use settings::{DEFAULT_MAX_QUESTIONS, DEFAULT_SESSION_SECS, QuizSettings, SettingsError};
