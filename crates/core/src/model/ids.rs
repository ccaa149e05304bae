use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_QUESTION_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a Question.
///
/// Issued from a process-wide counter, so ids never repeat across re-parses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Wraps an existing raw id.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocates the next process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_QUESTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Identifier for an option, unique within its question.
///
/// Composed from the position of the source block and the option's position in it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId {
    block: u32,
    index: u32,
}

impl OptionId {
    #[must_use]
    pub fn new(block: u32, index: u32) -> Self {
        Self { block, index }
    }

    /// Position of the question block in the bank.
    #[must_use]
    pub fn block(&self) -> u32 {
        self.block
    }

    /// Position of the option inside its block, before shuffling.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Debug for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionId({}-{})", self.block, self.index)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.block, self.index)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an id from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(QuestionId::new)
            .map_err(|_| ParseIdError { kind: "QuestionId" })
    }
}

impl FromStr for OptionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError { kind: "OptionId" };
        let (block, index) = s.split_once('-').ok_or_else(err)?;
        let block = block.parse::<u32>().map_err(|_| err())?;
        let index = index.parse::<u32>().map_err(|_| err())?;
        Ok(OptionId::new(block, index))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_ids_are_distinct() {
        let a = QuestionId::next();
        let b = QuestionId::next();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }

    #[test]
    fn option_id_display() {
        assert_eq!(OptionId::new(3, 1).to_string(), "3-1");
    }

    #[test]
    fn option_id_from_str() {
        let id: OptionId = "12-4".parse().unwrap();
        assert_eq!(id, OptionId::new(12, 4));
    }

    #[test]
    fn option_id_from_str_invalid() {
        assert!("12".parse::<OptionId>().is_err());
        assert!("a-1".parse::<OptionId>().is_err());
        assert!("1-".parse::<OptionId>().is_err());
    }

    #[test]
    fn question_id_roundtrip() {
        let original = QuestionId::new(42);
        let parsed: QuestionId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
