//! Plain-text tables and JSON output.

use std::fmt::Write as _;

use anyhow::Result;
use fms_core::{
  record::{Record, ResultSet},
  schema::{RecordSchema, display_name},
};
use serde::Serialize;

pub fn json(value: &impl Serialize) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

/// Print a result set, preceded by `summary` when given.
pub fn results(results: &ResultSet, summary: Option<&str>, json: bool) -> Result<()> {
  if json {
    return self::json(results);
  }
  if let Some(summary) = summary {
    println!("{summary}");
  }
  if results.is_empty() {
    println!("(no records)");
  } else {
    print!("{}", table(&results.columns, &results.rows));
  }
  Ok(())
}

/// One record as `FIELD  VALUE` lines in schema order.
pub fn record(schema: &RecordSchema, record: &Record) -> String {
  let labels: Vec<_> = schema.columns().iter().map(|c| display_name(c)).collect();
  let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

  let mut out = String::new();
  for (label, column) in labels.iter().zip(schema.columns()) {
    let value = record.get(&column).unwrap_or_default();
    let _ = writeln!(out, "{label:<width$}  {value}");
  }
  out
}

/// Left-aligned columns separated by two spaces, with a rule under the header.
pub fn table(columns: &[String], rows: &[Vec<String>]) -> String {
  let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
  for row in rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  let _ = writeln!(out, "{}", line(columns, &widths));
  let _ = writeln!(
    out,
    "{}",
    widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("  ")
  );
  for row in rows {
    let _ = writeln!(out, "{}", line(row, &widths));
  }
  out
}

fn line(cells: &[String], widths: &[usize]) -> String {
  let padded: Vec<_> = cells
    .iter()
    .zip(widths)
    .map(|(cell, &w)| format!("{cell:<w$}"))
    .collect();
  padded.join("  ").trim_end().to_owned()
}
