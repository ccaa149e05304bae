mod plan;
mod progress;
mod service;
mod timer;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use plan::{SessionBuilder, SessionPlan};
pub use progress::SessionSnapshot;
pub use service::{BankReport, QuizSession};
pub use timer::{TICK_PERIOD, Ticker};
pub use view::{OptionView, QuestionView, format_countdown};
pub use workflow::QuizRunner;
