//! Conversions between caller input, bound parameters and row values.

use fms_core::{
  record::{Record, ResultSet},
  schema::{Constraint, RecordSchema},
};
use rusqlite::{Row, types::ValueRef};

// ─── Search pattern ──────────────────────────────────────────────────────────

/// Translate substring-search text into a `GLOB` pattern.
///
/// `GLOB` compares case-sensitively, unlike SQLite's default `LIKE`. `%` and
/// `_` keep their `LIKE` meaning (any run / any single character); GLOB's own
/// metacharacters are bracketed so they match literally.
pub fn contains_pattern(text: &str) -> String {
  let mut pattern = String::with_capacity(text.len() + 2);
  pattern.push('*');
  for ch in text.chars() {
    match ch {
      '%' => pattern.push('*'),
      '_' => pattern.push('?'),
      '*' | '?' | '[' => {
        pattern.push('[');
        pattern.push(ch);
        pattern.push(']');
      }
      other => pattern.push(other),
    }
  }
  pattern.push('*');
  pattern
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// Values to bind for every schema column, in schema order.
///
/// Surrounding whitespace is stripped. A blank value in a `UNIQUE` column is
/// bound as `NULL` so that several records may leave it empty; reads render
/// `NULL` as the empty string again.
pub fn bind_values(schema: &RecordSchema, record: &Record) -> Vec<Option<String>> {
  schema
    .fields
    .iter()
    .zip(record.values_for(schema))
    .map(|(field, value)| {
      let value = value.trim();
      let blank = value.is_empty();
      (!(blank && field.constraint == Constraint::Unique)).then(|| value.to_owned())
    })
    .collect()
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Render one column as text; `NULL` becomes the empty string.
///
/// `DATE` columns have numeric affinity, so a bare year is read back as an
/// integer rather than text.
fn value_text(value: ValueRef<'_>) -> String {
  match value {
    ValueRef::Null => String::new(),
    ValueRef::Integer(i) => i.to_string(),
    ValueRef::Real(f) => f.to_string(),
    ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
  }
}

/// Read the first `width` columns of `row` as strings.
pub fn read_row(row: &Row<'_>, width: usize) -> rusqlite::Result<Vec<String>> {
  (0..width).map(|i| row.get_ref(i).map(value_text)).collect()
}

/// Zip a row back onto the schema's column identifiers.
pub fn into_record(schema: &RecordSchema, row: Vec<String>) -> Record {
  schema.columns().into_iter().zip(row).collect()
}

/// Execute a schema-wide `SELECT` and collect it into a [`ResultSet`].
pub fn fetch(
  conn: &rusqlite::Connection,
  schema: &RecordSchema,
  sql: &str,
  params: &[String],
) -> rusqlite::Result<ResultSet> {
  let width = schema.fields.len();
  let mut stmt = conn.prepare(sql)?;
  let rows = stmt
    .query_map(rusqlite::params_from_iter(params), |row| read_row(row, width))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut results = ResultSet::new(schema);
  results.rows = rows;
  Ok(results)
}
