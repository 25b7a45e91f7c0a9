//! Records and result sets: the shapes the store hands back to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  schema::{RecordSchema, column_name, display_name},
};

// ─── Record ──────────────────────────────────────────────────────────────────

/// A single row as a column → value mapping.
///
/// Keys are column identifiers (`"ORIGINAL_REF_NO"`); [`Record::set`] also
/// accepts human-readable field names and normalises them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
  pub fn new() -> Self { Self::default() }

  /// Set a field by field name or column identifier.
  pub fn set(&mut self, field: &str, value: impl Into<String>) -> &mut Self {
    self.0.insert(column_name(field), value.into());
    self
  }

  /// Builder-style [`Record::set`].
  pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
    self.set(field, value);
    self
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.0.get(&column_name(field)).map(String::as_str)
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// Check every column against `schema`.
  pub fn check_columns(&self, schema: &RecordSchema) -> Result<()> {
    match self.0.keys().find(|c| !schema.has_column(c)) {
      Some(column) => Err(Error::UnknownColumn {
        table:  schema.table_name,
        column: column.clone(),
      }),
      None => Ok(()),
    }
  }

  /// The trimmed key value for `schema`; it must be present and not blank.
  pub fn key(&self, schema: &RecordSchema) -> Result<String> {
    let key = self.get(&schema.key_field()).unwrap_or_default().trim();
    if key.is_empty() {
      return Err(Error::EmptyKey(schema.key_fields[0]));
    }
    Ok(key.to_owned())
  }

  /// Values in schema column order; absent columns become empty strings.
  pub fn values_for(&self, schema: &RecordSchema) -> Vec<String> {
    schema
      .columns()
      .iter()
      .map(|c| self.0.get(c).cloned().unwrap_or_default())
      .collect()
  }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Record {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut record = Self::new();
    for (k, v) in iter {
      record.set(k.as_ref(), v);
    }
    record
  }
}

// ─── ResultSet ───────────────────────────────────────────────────────────────

/// Rows plus the display names of the columns that produced them.
///
/// Rebuilt on every query and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
  /// Column names with underscores shown as spaces.
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<String>>,
}

impl ResultSet {
  pub fn new(schema: &RecordSchema) -> Self {
    Self { columns: schema.display_columns(), rows: Vec::new() }
  }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Rows as records keyed by column identifier.
  pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
    self.rows.iter().map(|row| {
      self
        .columns
        .iter()
        .zip(row)
        .map(|(c, v)| (c.as_str(), v.clone()))
        .collect()
    })
  }

  /// Values of one column across all rows, by display or column name.
  pub fn column(&self, name: &str) -> Option<Vec<&str>> {
    let wanted = display_name(&column_name(name));
    let idx = self.columns.iter().position(|c| *c == wanted)?;
    Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
  }
}
