use serde::Serialize;

use quiz_core::model::{Answer, OptionId, Question, QuestionId};

/// Presentation-agnostic shape of one question for the renderer.
///
/// Carries flags, not styling: the renderer decides how a selected wrong
/// option looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    /// One-based position in the working set.
    pub number: usize,
    pub text: String,
    pub answered: bool,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub id: OptionId,
    pub text: String,
    pub is_correct: bool,
    pub selected: bool,
}

impl QuestionView {
    #[must_use]
    pub fn from_question(index: usize, question: &Question, answer: Option<&Answer>) -> Self {
        let chosen = answer.map(|a| a.option_id);
        Self {
            id: question.id(),
            number: index + 1,
            text: question.text().to_owned(),
            answered: answer.is_some(),
            options: question
                .options()
                .iter()
                .map(|option| OptionView {
                    id: option.id(),
                    text: option.text().to_owned(),
                    is_correct: option.is_correct(),
                    selected: chosen == Some(option.id()),
                })
                .collect(),
        }
    }

    /// The option the user picked, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&OptionView> {
        self.options.iter().find(|option| option.selected)
    }
}

/// Formats a countdown as `m:ss`.
#[must_use]
pub fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
