//! Plain-text question bank format.
//!
//! A bank is a sequence of blocks separated by `+++++`. Each block holds the
//! question text followed by its options, separated by `=====`. Options whose
//! text starts with one or more `#` are correct:
//!
//! ```text
//! What is 2 + 2?
//! =====
//! 3
//! =====
//! #4
//! +++++
//! ...
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnswerOption, OptionId, Question, QuestionId};

pub const BLOCK_DELIMITER: &str = "+++++";
pub const OPTION_DELIMITER: &str = "=====";
pub const CORRECT_MARKER: char = '#';

/// Delimiters and marker used to read a bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankFormat {
    pub block_delimiter: String,
    pub option_delimiter: String,
    pub correct_marker: char,
}

impl Default for BankFormat {
    fn default() -> Self {
        Self {
            block_delimiter: BLOCK_DELIMITER.to_owned(),
            option_delimiter: OPTION_DELIMITER.to_owned(),
            correct_marker: CORRECT_MARKER,
        }
    }
}

/// Parse a bank using the default format.
#[must_use]
pub fn parse_bank(text: &str) -> Vec<Question> {
    parse_bank_with(&BankFormat::default(), text)
}

/// Parse a bank into questions, in bank order.
///
/// Never fails: a block without options becomes a question with no options.
/// Blank input yields no questions at all.
#[must_use]
pub fn parse_bank_with(format: &BankFormat, text: &str) -> Vec<Question> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    text.split(format.block_delimiter.as_str())
        .enumerate()
        .map(|(block, raw)| parse_block(format, position(block), raw))
        .collect()
}

fn parse_block(format: &BankFormat, block: u32, raw: &str) -> Question {
    let mut segments = raw.trim().split(format.option_delimiter.as_str());
    let text = segments.next().unwrap_or_default().trim();
    let options = segments
        .enumerate()
        .map(|(index, segment)| parse_option(format, OptionId::new(block, position(index)), segment))
        .collect();

    Question::new(QuestionId::next(), text, options)
}

fn parse_option(format: &BankFormat, id: OptionId, segment: &str) -> AnswerOption {
    let trimmed = segment.trim();
    let unmarked = trimmed.trim_start_matches(format.correct_marker);
    let is_correct = unmarked.len() != trimmed.len();
    AnswerOption::new(id, unmarked.trim(), is_correct)
}

fn position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

//
// ─── AUDIT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankIssueKind {
    NoOptions,
    NoCorrectOption,
    MultipleCorrect { count: usize },
}

/// A question that can't be scored the usual way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankIssue {
    pub question_id: QuestionId,
    /// Zero-based block position in the bank.
    pub position: usize,
    pub kind: BankIssueKind,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank has {} malformed question(s)", .issues.len())]
    Malformed { issues: Vec<BankIssue> },
}

/// Report every question without exactly one correct option.
#[must_use]
pub fn audit(questions: &[Question]) -> Vec<BankIssue> {
    questions
        .iter()
        .enumerate()
        .filter_map(|(position, question)| {
            let kind = if !question.is_answerable() {
                BankIssueKind::NoOptions
            } else {
                match question.correct_count() {
                    0 => BankIssueKind::NoCorrectOption,
                    1 => return None,
                    count => BankIssueKind::MultipleCorrect { count },
                }
            };
            Some(BankIssue {
                question_id: question.id(),
                position,
                kind,
            })
        })
        .collect()
}
