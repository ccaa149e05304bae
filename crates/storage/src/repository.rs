use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by question-bank sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question bank not found: {location}")]
    NotFound { location: String },

    #[error("io error: {0}")]
    Io(String),

    #[error("question bank is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Single-shot retrieval of the raw question-bank text.
///
/// Sources return the whole bank as one string; parsing happens elsewhere.
#[async_trait]
pub trait BankSource: Send + Sync {
    /// Fetch the full bank text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read.
    async fn fetch(&self) -> Result<String, StorageError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Bank held in memory, for tests and embedded banks.
#[derive(Clone, Default)]
pub struct InMemoryBank {
    text: Arc<Mutex<Option<String>>>,
}

impl InMemoryBank {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(Mutex::new(Some(text.into()))),
        }
    }

    /// A source whose fetches fail with `NotFound` until `replace` is called.
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }

    /// Swap the bank text seen by subsequent fetches.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the lock is poisoned.
    pub fn replace(&self, text: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .text
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *guard = Some(text.into());
        Ok(())
    }
}

#[async_trait]
impl BankSource for InMemoryBank {
    async fn fetch(&self) -> Result<String, StorageError> {
        let guard = self
            .text
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.clone().ok_or_else(|| StorageError::NotFound {
            location: self.describe(),
        })
    }

    fn describe(&self) -> String {
        "memory".to_owned()
    }
}
