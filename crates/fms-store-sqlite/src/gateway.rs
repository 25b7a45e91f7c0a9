//! Scoped access to the database file.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, Transaction};

/// Opens one connection per unit of work.
///
/// No handle outlives a call to [`Gateway::with_connection`].
#[derive(Debug, Clone)]
pub struct Gateway {
  path: PathBuf,
}

impl Gateway {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// Run `body` inside a fresh connection and transaction.
  ///
  /// Commits when `body` returns `Ok`, rolls back when it returns `Err`; the
  /// body's error is passed through unchanged. If `body` panics the
  /// transaction and connection are dropped during unwinding, which also
  /// rolls back and closes.
  pub fn with_connection<T, E>(
    &self,
    body: impl FnOnce(&Transaction<'_>) -> Result<T, E>,
  ) -> Result<T, E>
  where
    E: From<rusqlite::Error>,
  {
    let mut conn = Connection::open(&self.path)?;
    let tx = conn.transaction()?;

    match body(&tx) {
      Ok(value) => {
        tx.commit()?;
        Ok(value)
      }
      Err(e) => {
        if let Err(rollback) = tx.rollback() {
          tracing::warn!(error = %rollback, path = ?self.path, "rollback failed");
        } else {
          tracing::debug!(path = ?self.path, "rolled back");
        }
        Err(e)
      }
    }
  }
}
