//! Argument types that need more than clap's derive.

use std::{
  io::{self, BufRead as _, Write as _},
  str::FromStr,
};

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::Args;
use fms_core::{query::DateFilter, record::Record};

// ─── Field assignments ───────────────────────────────────────────────────────

/// One `FIELD=VALUE` pair from `-f`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
  pub field: String,
  pub value: String,
}

impl FromStr for Assignment {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (field, value) = s
      .split_once('=')
      .ok_or_else(|| format!("expected FIELD=VALUE, got {s:?}"))?;
    if field.trim().is_empty() {
      return Err(format!("missing field name in {s:?}"));
    }
    Ok(Self { field: field.trim().to_owned(), value: value.to_owned() })
  }
}

pub fn assignments_to_record(fields: Vec<Assignment>) -> Record {
  fields.into_iter().map(|a| (a.field, a.value)).collect()
}

// ─── Query window ────────────────────────────────────────────────────────────

/// Mutually exclusive date filter flags.
#[derive(Args, Debug, Default, Clone)]
pub struct Window {
  /// Start of an inclusive range, `DD-MM-YYYY`.
  #[arg(long, value_name = "DATE", requires = "to", conflicts_with_all = ["month", "year"])]
  pub from:  Option<String>,
  /// End of an inclusive range, `DD-MM-YYYY`.
  #[arg(long, value_name = "DATE", requires = "from")]
  pub to:    Option<String>,
  /// Month number; needs `--year`.
  #[arg(long, requires = "year")]
  pub month: Option<String>,
  #[arg(long)]
  pub year:  Option<String>,
}

impl Window {
  /// The filter these flags describe; the last 30 days when none are set.
  pub fn into_filter(self, today: NaiveDate) -> Result<DateFilter> {
    let filter = match self {
      Self { from: Some(from), to: Some(to), month: None, year: None } => {
        DateFilter::range(&from, &to)?
      }
      Self { from: None, to: None, month: Some(month), year: Some(year) } => {
        DateFilter::month(&month, &year)?
      }
      Self { from: None, to: None, month: None, year: Some(year) } => {
        DateFilter::year(&year)?
      }
      Self { from: None, to: None, month: None, year: None } => DateFilter::recent(today),
      _ => bail!("use either --from/--to, --month/--year or --year"),
    };
    Ok(filter)
  }
}

// ─── Prompt ──────────────────────────────────────────────────────────────────

/// Ask a yes/no question on stdin; anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
  print!("{prompt} [y/N] ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
