//! Record schemas: the declared field layout of each category's table.
//!
//! A schema is pure data: the backing table, the ordered fields, which fields
//! identify a record, and which columns the search and date queries look at.
//! Storage backends derive every statement they issue from it.

use std::fmt::Write as _;

use crate::{Error, Result};

pub const ORIGINAL_REF_NO: &str = "ORIGINAL_REF_NO";
pub const CURRENT_REF_NO: &str = "CURRENT_REF_NO";

// ─── Column naming ───────────────────────────────────────────────────────────

/// Map a human-readable field name to its column identifier.
///
/// Uppercases and replaces spaces with underscores. Existing databases depend
/// on this mapping; it must never change.
pub fn column_name(field: &str) -> String {
  field.trim().to_uppercase().replace(' ', "_")
}

/// Reverse of [`column_name`] for display: underscores become spaces.
pub fn display_name(column: &str) -> String { column.replace('_', " ") }

// ─── Field ───────────────────────────────────────────────────────────────────

/// SQL type of a column, as declared in the table DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
  /// `VARCHAR(n)`.
  Varchar(u16),
  /// `DATE`; values are ISO `YYYY-MM-DD` strings.
  ///
  /// The column has numeric affinity. Text that reads as a number is stored
  /// as one, so `"1.50"` comes back as `"1.5"`; ISO dates are unaffected.
  Date,
}

impl ColumnType {
  fn sql(self) -> String {
    match self {
      Self::Varchar(n) => format!("VARCHAR({n})"),
      Self::Date => "DATE".to_owned(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
  None,
  PrimaryKey,
  Unique,
}

/// One declared field of a record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
  /// Human-readable name, e.g. `"Original REF NO"`.
  pub name:       &'static str,
  pub ty:         ColumnType,
  pub constraint: Constraint,
}

impl Field {
  const fn text(name: &'static str, len: u16) -> Self {
    Self { name, ty: ColumnType::Varchar(len), constraint: Constraint::None }
  }

  const fn date(name: &'static str) -> Self {
    Self { name, ty: ColumnType::Date, constraint: Constraint::None }
  }

  const fn primary(name: &'static str) -> Self {
    Self { name, ty: ColumnType::Varchar(15), constraint: Constraint::PrimaryKey }
  }

  const fn unique(name: &'static str) -> Self {
    Self { name, ty: ColumnType::Varchar(15), constraint: Constraint::Unique }
  }

  pub fn column(&self) -> String { column_name(self.name) }

  pub fn is_date(&self) -> bool { self.ty == ColumnType::Date }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

/// The immutable declaration of one category's table.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSchema {
  pub table_name:   &'static str,
  /// Fields in table order; statements list columns in this order.
  pub fields:       &'static [Field],
  /// Fields that identify a record, most preferred first.
  pub key_fields:   &'static [&'static str],
  /// Field matched by substring search.
  pub search_field: &'static str,
  /// Date field used by temporal queries unless the caller picks another.
  pub date_field:   &'static str,
}

impl RecordSchema {
  /// Column used for exact-match lookup, update and delete.
  ///
  /// `ORIGINAL_REF_NO` when the schema tracks it, otherwise `CURRENT_REF_NO`;
  /// both are declared through the order of `key_fields`.
  pub fn key_field(&self) -> String { column_name(self.key_fields[0]) }

  /// All column identifiers in schema order.
  pub fn columns(&self) -> Vec<String> {
    self.fields.iter().map(Field::column).collect()
  }

  /// Display names of all columns, in schema order.
  pub fn display_columns(&self) -> Vec<String> {
    self.columns().iter().map(|c| display_name(c)).collect()
  }

  pub fn has_column(&self, column: &str) -> bool {
    self.fields.iter().any(|f| f.column() == column)
  }

  /// Look up a field by column identifier or by human-readable name.
  pub fn field(&self, name: &str) -> Result<&'static Field> {
    let column = column_name(name);
    self
      .fields
      .iter()
      .find(|f| f.column() == column)
      .ok_or_else(|| Error::UnknownColumn { table: self.table_name, column })
  }

  pub fn search_column(&self) -> String { column_name(self.search_field) }

  /// Every `DATE` column of the table.
  pub fn date_fields(&self) -> impl Iterator<Item = &'static Field> + '_ {
    self.fields.iter().filter(|f| f.is_date())
  }

  /// Resolve the date column for a temporal query: `requested` if given
  /// (and a date column), else the designated date field.
  pub fn date_column(&self, requested: Option<&str>) -> Result<String> {
    let Some(name) = requested else {
      return Ok(column_name(self.date_field));
    };
    let field = self.field(name)?;
    self
      .date_fields()
      .find(|f| *f == field)
      .map(Field::column)
      .ok_or_else(|| Error::NotADateField {
        table:  self.table_name,
        column: field.column(),
      })
  }

  /// `CREATE TABLE IF NOT EXISTS` statement for this schema.
  pub fn create_table_sql(&self) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (", self.table_name);
    for (i, field) in self.fields.iter().enumerate() {
      let sep = if i == 0 { "" } else { "," };
      let _ = write!(sql, "{sep}\n    {} {}", field.column(), field.ty.sql());
      match field.constraint {
        Constraint::PrimaryKey => sql.push_str(" PRIMARY KEY"),
        Constraint::Unique => sql.push_str(" UNIQUE"),
        Constraint::None => {}
      }
    }
    sql.push_str("\n)");
    sql
  }
}

// ─── Declarations ────────────────────────────────────────────────────────────

pub static FILES_SENT: RecordSchema = RecordSchema {
  table_name:   "files_sent_to_dpp",
  fields:       &[
    Field::primary("Original REF NO"),
    Field::unique("Current REF NO"),
    Field::text("Complainant", 30),
    Field::text("Suspect", 30),
    Field::text("Offence", 50),
    Field::text("Investigating Officer", 30),
    Field::date("Date Sent"),
    Field::date("Date Returned"),
    Field::text("File Sent To", 20),
    Field::text("Remarks", 200),
  ],
  key_fields:   &["Original REF NO", "Current REF NO"],
  search_field: "Complainant",
  date_field:   "Date Sent",
};

pub static COURT_GOING: RecordSchema = RecordSchema {
  table_name:   "court_going",
  fields:       &[
    Field::primary("Current REF NO"),
    Field::text("Complainant", 30),
    Field::text("Suspect", 30),
    Field::text("Offence", 50),
    Field::text("Investigating Officer", 30),
    Field::date("Date Sent to Court"),
    Field::date("Date Next in Court"),
    Field::text("Status Of Case", 30),
  ],
  key_fields:   &["Current REF NO"],
  search_field: "Complainant",
  date_field:   "Date Sent to Court",
};

pub static PUT_AWAY: RecordSchema = RecordSchema {
  table_name:   "putaway",
  fields:       &[
    Field::primary("Original REF NO"),
    Field::unique("Current REF NO"),
    Field::text("Complainant", 30),
    Field::text("Suspect", 30),
    Field::text("Offence", 50),
    Field::text("Location of File", 30),
    Field::text("Status", 30),
    Field::date("Date Sent"),
  ],
  key_fields:   &["Original REF NO", "Current REF NO"],
  search_field: "Complainant",
  date_field:   "Date Sent",
};

pub static ALLOCATION: RecordSchema = RecordSchema {
  table_name:   "allocation",
  fields:       &[
    Field::primary("Original REF NO"),
    Field::unique("Current REF NO"),
    Field::text("Complainant", 30),
    Field::text("Suspect", 30),
    Field::text("Offence", 50),
    Field::text("Investigating Officer", 30),
    Field::date("Date of Allocation"),
  ],
  key_fields:   &["Original REF NO", "Current REF NO"],
  search_field: "Complainant",
  date_field:   "Date of Allocation",
};

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  fn all() -> [&'static RecordSchema; 4] {
    [&FILES_SENT, &COURT_GOING, &PUT_AWAY, &ALLOCATION]
  }

  #[test]
  fn column_names_are_uppercase_with_underscores() {
    assert_eq!(column_name("Original REF NO"), "ORIGINAL_REF_NO");
    assert_eq!(column_name("Date Sent to Court"), "DATE_SENT_TO_COURT");
    assert_eq!(column_name("OFFENCE"), "OFFENCE");
    assert_eq!(display_name("DATE_OF_ALLOCATION"), "DATE OF ALLOCATION");
  }

  #[test]
  fn column_mapping_is_injective_per_schema() {
    for schema in all() {
      let columns: HashSet<_> = schema.columns().into_iter().collect();
      assert_eq!(columns.len(), schema.fields.len(), "{}", schema.table_name);
    }
  }

  #[test]
  fn key_field_prefers_original_reference() {
    assert_eq!(FILES_SENT.key_field(), ORIGINAL_REF_NO);
    assert_eq!(PUT_AWAY.key_field(), ORIGINAL_REF_NO);
    assert_eq!(ALLOCATION.key_field(), ORIGINAL_REF_NO);
    assert_eq!(COURT_GOING.key_field(), CURRENT_REF_NO);
  }

  #[test]
  fn key_and_special_fields_are_declared() {
    for schema in all() {
      for key in schema.key_fields {
        assert!(schema.field(key).is_ok(), "{}: {key}", schema.table_name);
      }
      assert!(schema.has_column(&schema.search_column()));
      assert!(schema.field(schema.date_field).unwrap().is_date());
    }
  }

  #[test]
  fn field_lookup_accepts_either_spelling() {
    let by_name = PUT_AWAY.field("Location of File").unwrap();
    let by_column = PUT_AWAY.field("LOCATION_OF_FILE").unwrap();
    assert_eq!(by_name, by_column);
    assert!(matches!(
      PUT_AWAY.field("Remarks"),
      Err(Error::UnknownColumn { table: "putaway", .. })
    ));
  }

  #[test]
  fn date_column_override_must_be_a_date() {
    assert_eq!(COURT_GOING.date_column(None).unwrap(), "DATE_SENT_TO_COURT");
    assert_eq!(
      COURT_GOING.date_column(Some("Date Next in Court")).unwrap(),
      "DATE_NEXT_IN_COURT"
    );
    assert!(matches!(
      COURT_GOING.date_column(Some("Offence")),
      Err(Error::NotADateField { .. })
    ));
  }

  #[test]
  fn date_fields_are_the_date_typed_columns() {
    let columns: Vec<_> = COURT_GOING.date_fields().map(Field::column).collect();
    assert_eq!(columns, ["DATE_SENT_TO_COURT", "DATE_NEXT_IN_COURT"]);

    let columns: Vec<_> = FILES_SENT.date_fields().map(Field::column).collect();
    assert_eq!(columns, ["DATE_SENT", "DATE_RETURNED"]);

    for schema in all() {
      assert!(schema.date_fields().all(|f| schema.date_column(Some(f.name)).is_ok()));
    }
  }

  #[test]
  fn ddl_declares_keys_and_uniqueness() {
    let sql = FILES_SENT.create_table_sql();
    assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS files_sent_to_dpp ("));
    assert!(sql.contains("ORIGINAL_REF_NO VARCHAR(15) PRIMARY KEY"));
    assert!(sql.contains("CURRENT_REF_NO VARCHAR(15) UNIQUE"));
    assert!(sql.contains("DATE_SENT DATE"));
    assert!(sql.contains("REMARKS VARCHAR(200)"));

    let sql = COURT_GOING.create_table_sql();
    assert!(sql.contains("CURRENT_REF_NO VARCHAR(15) PRIMARY KEY"));
  }
}
