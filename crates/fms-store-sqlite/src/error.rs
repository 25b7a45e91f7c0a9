//! Error type for `fms-store-sqlite`.
//!
//! Raw `rusqlite` failures never leave this crate unclassified: writes report
//! [`Error::DuplicateKey`] or [`Error::Persistence`], reads [`Error::Query`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] fms_core::Error),

  /// Unique or primary-key violation on save.
  #[error("a record with reference {key:?} already exists in {table}")]
  DuplicateKey {
    table:  &'static str,
    key:    String,
    #[source]
    source: rusqlite::Error,
  },

  #[error("this reference is not in records: {key:?}")]
  NotFound { table: &'static str, key: String },

  /// Any other failure while writing.
  #[error("persistence error: {0}")]
  Persistence(#[from] rusqlite::Error),

  /// Any failure while reading.
  #[error("query error: {0}")]
  Query(#[source] rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
