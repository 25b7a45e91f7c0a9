//! Error types for `fms-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown record category: {0:?}")]
  UnknownCategory(String),

  #[error("{table} has no column {column:?}")]
  UnknownColumn { table: &'static str, column: String },

  #[error("{0} must not be empty")]
  EmptyKey(&'static str),

  #[error("invalid date {0:?}: expected DD-MM-YYYY")]
  InvalidDate(String),

  #[error("invalid month {0:?}: expected 01 to 12")]
  InvalidMonth(String),

  #[error("invalid year {0:?}: expected four digits")]
  InvalidYear(String),

  #[error("{table}.{column} is not a date column")]
  NotADateField { table: &'static str, column: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
