//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::{Path, PathBuf};

use fms_core::{
  category::Category,
  query::{DateQuery, QueryOutcome},
  record::{Record, ResultSet},
  schema::RecordSchema,
  store::RecordStore,
};
use rusqlite::{ErrorCode, OptionalExtension as _, Transaction, ffi, params_from_iter};
use strum::IntoEnumIterator as _;

use crate::{
  Error, Result,
  encode::{bind_values, contains_pattern, fetch, into_record, read_row},
  gateway::Gateway,
  statement,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The case-file register backed by a single SQLite file.
///
/// Holds only the file path; each operation opens and closes its own
/// connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  gateway: Gateway,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and make sure every table exists.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let store = Self { gateway: Gateway::new(path) };
    store.init_schema()?;
    Ok(store)
  }

  pub fn path(&self) -> &Path { self.gateway.path() }

  /// Idempotent; safe to run on every startup.
  fn init_schema(&self) -> Result<()> {
    self.gateway.with_connection(|tx| {
      for category in Category::iter() {
        tx.execute_batch(&category.schema().create_table_sql())?;
      }
      Ok::<_, Error>(())
    })?;
    tracing::debug!(path = ?self.path(), "schema ready");
    Ok(())
  }

  /// Run a read-only unit of work, classifying failures as [`Error::Query`].
  fn read<T>(
    &self,
    body: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
  ) -> Result<T> {
    self.gateway.with_connection(body).map_err(Error::Query)
  }
}

fn key_exists(
  conn: &rusqlite::Connection,
  schema: &RecordSchema,
  key: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(&statement::exists(schema), [key], |_| Ok(()))
      .optional()?
      .is_some(),
  )
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.code == ErrorCode::ConstraintViolation
        && matches!(
          f.extended_code,
          ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
        )
  )
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  fn save(&self, category: Category, record: &Record) -> Result<String> {
    let schema = category.schema();
    record.check_columns(schema)?;
    let key = record.key(schema)?;
    let values = bind_values(schema, record);

    self.gateway.with_connection(|tx| {
      tx.execute(&statement::insert(schema), params_from_iter(&values))
        .map_err(|e| {
          if is_unique_violation(&e) {
            Error::DuplicateKey { table: schema.table_name, key: key.clone(), source: e }
          } else {
            Error::Persistence(e)
          }
        })?;
      Ok::<_, Error>(())
    })?;

    tracing::debug!(table = schema.table_name, key = %key, "saved record");
    Ok(key)
  }

  fn update(&self, category: Category, record: &Record) -> Result<String> {
    let schema = category.schema();
    record.check_columns(schema)?;
    let key = record.key(schema)?;
    let width = schema.fields.len();

    self.gateway.with_connection(|tx| {
      let Some(row) = tx
        .query_row(&statement::select_by_key(schema), [&key], |row| read_row(row, width))
        .optional()?
      else {
        return Err(Error::NotFound { table: schema.table_name, key: key.clone() });
      };

      // Columns absent from `record` keep their stored values.
      let mut merged = into_record(schema, row);
      for (column, value) in record.iter() {
        merged.set(column, value);
      }

      let mut params = bind_values(schema, &merged);
      params.push(Some(key.clone()));
      tx.execute(&statement::update(schema), params_from_iter(&params))?;
      Ok::<_, Error>(())
    })?;

    tracing::debug!(table = schema.table_name, key = %key, "updated record");
    Ok(key)
  }

  fn delete(&self, category: Category, key: &str) -> Result<()> {
    let schema = category.schema();
    if key.trim().is_empty() {
      return Err(fms_core::Error::EmptyKey(schema.key_fields[0]).into());
    }

    self.gateway.with_connection(|tx| {
      if !key_exists(tx, schema, key)? {
        return Err(Error::NotFound { table: schema.table_name, key: key.to_owned() });
      }
      tx.execute(&statement::delete(schema), [key])?;
      Ok::<_, Error>(())
    })?;

    tracing::debug!(table = schema.table_name, key, "deleted record");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  fn exists(&self, category: Category, key: &str) -> Result<bool> {
    let schema = category.schema();
    self.read(|tx| key_exists(tx, schema, key))
  }

  fn find_by_key(&self, category: Category, key: &str) -> Result<Option<Record>> {
    let schema = category.schema();
    let width = schema.fields.len();

    let row = self.read(|tx| {
      tx.query_row(&statement::select_by_key(schema), [key], |row| read_row(row, width))
        .optional()
    })?;

    Ok(row.map(|values| into_record(schema, values)))
  }

  fn search(&self, category: Category, text: Option<&str>) -> Result<ResultSet> {
    let schema = category.schema();
    let pattern = text.filter(|t| !t.is_empty()).map(contains_pattern);
    let stmt = statement::search(schema, pattern);

    let results = self.read(|tx| fetch(tx, schema, &stmt.sql, &stmt.params))?;
    tracing::debug!(table = schema.table_name, text = ?text, rows = results.len(), "search");
    Ok(results)
  }

  // ── Date queries ──────────────────────────────────────────────────────────

  fn query(&self, query: &DateQuery) -> Result<QueryOutcome> {
    let schema = query.register.category().schema();
    let column = schema.date_column(query.field.as_deref())?;
    let stmt =
      statement::dated(schema, &column, &query.filter, query.register.destination());

    let results = self.read(|tx| fetch(tx, schema, &stmt.sql, &stmt.params))?;
    tracing::debug!(
      register = %query.register,
      column = %column,
      rows = results.len(),
      "date query"
    );
    Ok(results.into())
  }
}
