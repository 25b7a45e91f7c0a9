//! SQL text generated from a [`RecordSchema`].
//!
//! Only schema-declared identifiers are spliced into the text. Every value
//! travels as a numbered parameter.

use fms_core::{
  category::Destination,
  query::{DateFilter, ISO_DATE_FORMAT},
  schema::RecordSchema,
};

/// A statement and the parameters it binds, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
  pub sql:    String,
  pub params: Vec<String>,
}

fn column_list(schema: &RecordSchema) -> String { schema.columns().join(", ") }

fn placeholders(from: usize, count: usize) -> String {
  (from..from + count)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn insert(schema: &RecordSchema) -> String {
  format!(
    "INSERT INTO {} ({}) VALUES ({})",
    schema.table_name,
    column_list(schema),
    placeholders(1, schema.fields.len()),
  )
}

/// Sets every column to `?1..?n` and matches the key on `?{n+1}`.
pub fn update(schema: &RecordSchema) -> String {
  let assignments = schema
    .columns()
    .iter()
    .enumerate()
    .map(|(i, c)| format!("{c} = ?{}", i + 1))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "UPDATE {} SET {assignments} WHERE {} = ?{}",
    schema.table_name,
    schema.key_field(),
    schema.fields.len() + 1,
  )
}

pub fn exists(schema: &RecordSchema) -> String {
  format!(
    "SELECT 1 FROM {} WHERE {} = ?1 LIMIT 1",
    schema.table_name,
    schema.key_field()
  )
}

pub fn select_by_key(schema: &RecordSchema) -> String {
  format!(
    "SELECT {} FROM {} WHERE {} = ?1",
    column_list(schema),
    schema.table_name,
    schema.key_field()
  )
}

pub fn delete(schema: &RecordSchema) -> String {
  format!("DELETE FROM {} WHERE {} = ?1", schema.table_name, schema.key_field())
}

/// All rows, or, with `pattern`, rows whose search column matches it.
pub fn search(schema: &RecordSchema, pattern: Option<String>) -> Statement {
  let mut sql = format!("SELECT {} FROM {}", column_list(schema), schema.table_name);
  let params = match pattern {
    Some(p) => {
      sql.push_str(&format!(" WHERE {} GLOB ?1", schema.search_column()));
      vec![p]
    }
    None => Vec::new(),
  };
  Statement { sql, params }
}

/// Rows whose `column` satisfies `filter`, optionally narrowed to one review
/// destination.
pub fn dated(
  schema: &RecordSchema,
  column: &str,
  filter: &DateFilter,
  destination: Option<Destination>,
) -> Statement {
  let (predicate, mut params) = match *filter {
    DateFilter::Range { from, to } => (
      format!("date({column}) BETWEEN ?1 AND ?2"),
      vec![
        from.format(ISO_DATE_FORMAT).to_string(),
        to.format(ISO_DATE_FORMAT).to_string(),
      ],
    ),
    DateFilter::Month { month, year } => (
      format!("strftime('%m-%Y', {column}) = ?1"),
      vec![format!("{month:02}-{year:04}")],
    ),
    DateFilter::Year { year } => (
      format!("strftime('%Y', {column}) = ?1"),
      vec![format!("{year:04}")],
    ),
  };

  let mut sql = format!(
    "SELECT {} FROM {} WHERE {predicate}",
    column_list(schema),
    schema.table_name
  );
  if let Some(dest) = destination {
    params.push(dest.to_string());
    sql.push_str(&format!(" AND {} = ?{}", Destination::COLUMN, params.len()));
  }

  Statement { sql, params }
}
