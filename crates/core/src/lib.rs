#![forbid(unsafe_code)]

pub mod bank;
pub mod model;
pub mod time;

pub use bank::{BankError, BankFormat, BankIssue, BankIssueKind, audit, parse_bank, parse_bank_with};
pub use time::Clock;
