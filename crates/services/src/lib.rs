#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::RunnerError;

pub use sessions::{
    BankReport, OptionView, QuestionView, QuizRunner, QuizSession, SessionBuilder, SessionPlan,
    SessionSnapshot, TICK_PERIOD, Ticker, format_countdown,
};
