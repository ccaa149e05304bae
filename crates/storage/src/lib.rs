#![forbid(unsafe_code)]

pub mod file;
pub mod repository;

pub use file::FileBank;
pub use repository::{BankSource, InMemoryBank, StorageError};
