//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::BankError;
use storage::StorageError;

/// Errors emitted by `QuizRunner` while loading a bank.
///
/// Neither variant leaves the runner unusable; the previous bank stays in place.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunnerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Bank(#[from] BankError),
}
