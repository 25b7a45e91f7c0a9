//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `fms-store-sqlite`). Callers such as
//! the `fms` CLI depend on this abstraction, not on a concrete backend.

use crate::{
  category::{Category, Register},
  query::{DateFilter, DateQuery, QueryOutcome},
  record::{Record, ResultSet},
};

/// Schema-driven CRUD and search over the case-file categories.
///
/// Every call is a complete unit of work: it either takes full effect or
/// leaves previously committed state untouched.
pub trait RecordStore {
  type Error: std::error::Error + From<crate::Error> + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a new record and return its key value.
  ///
  /// Values are stored trimmed; columns absent from `record` are stored as
  /// empty strings. Fails if the key, or any other unique column, is already
  /// taken.
  fn save(&self, category: Category, record: &Record) -> Result<String, Self::Error>;

  /// Overwrite the fields present in `record` on the record whose key
  /// matches, returning that key. Other fields keep their stored values.
  /// Fails if no such record exists.
  fn update(&self, category: Category, record: &Record) -> Result<String, Self::Error>;

  /// Delete the record with the given key. Confirmation is the caller's job.
  fn delete(&self, category: Category, key: &str) -> Result<(), Self::Error>;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn exists(&self, category: Category, key: &str) -> Result<bool, Self::Error>;

  /// Exact, case-sensitive key lookup. Returns `None` if not found.
  fn find_by_key(
    &self,
    category: Category,
    key: &str,
  ) -> Result<Option<Record>, Self::Error>;

  /// Records whose complainant contains `text`; every record when `text` is
  /// `None` or empty. Row order is whatever the backend yields.
  fn search(
    &self,
    category: Category,
    text: Option<&str>,
  ) -> Result<ResultSet, Self::Error>;

  fn list_all(&self, category: Category) -> Result<ResultSet, Self::Error> {
    self.search(category, None)
  }

  // ── Date queries ──────────────────────────────────────────────────────

  fn query(&self, query: &DateQuery) -> Result<QueryOutcome, Self::Error>;

  /// Records dated between `from` and `to` (`DD-MM-YYYY`, inclusive).
  fn query_range(
    &self,
    register: Register,
    from: &str,
    to: &str,
  ) -> Result<QueryOutcome, Self::Error> {
    self.query(&DateQuery::new(register, DateFilter::range(from, to)?))
  }

  fn query_month(
    &self,
    register: Register,
    month: &str,
    year: &str,
  ) -> Result<QueryOutcome, Self::Error> {
    self.query(&DateQuery::new(register, DateFilter::month(month, year)?))
  }

  fn query_year(
    &self,
    register: Register,
    year: &str,
  ) -> Result<QueryOutcome, Self::Error> {
    self.query(&DateQuery::new(register, DateFilter::year(year)?))
  }
}
