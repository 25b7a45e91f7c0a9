//! Date-filtered queries over a register.
//!
//! Exactly one [`DateFilter`] mode applies per query. Dates come in as
//! `DD-MM-YYYY`, the way case officers write them, and are compared as real
//! calendar dates against the ISO values stored in the table.

use chrono::{Datelike as _, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, category::Register, record::ResultSet};

/// Input format for range bounds.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Storage format of date columns.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the preset window used when no filter is given.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse `DD-MM-YYYY`; `/` is accepted in place of `-`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  let normalised = s.trim().replace('/', "-");
  NaiveDate::parse_from_str(&normalised, DATE_FORMAT)
    .map_err(|_| Error::InvalidDate(s.to_owned()))
}

fn parse_month(s: &str) -> Result<u32> {
  let s = s.trim();
  match s.parse::<u32>() {
    Ok(m) if (1..=12).contains(&m) && s.len() <= 2 => Ok(m),
    _ => Err(Error::InvalidMonth(s.to_owned())),
  }
}

fn parse_year(s: &str) -> Result<i32> {
  let s = s.trim();
  if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::InvalidYear(s.to_owned()));
  }
  s.parse().map_err(|_| Error::InvalidYear(s.to_owned()))
}

// ─── Filter ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DateFilter {
  /// Inclusive on both ends.
  Range { from: NaiveDate, to: NaiveDate },
  Month { month: u32, year: i32 },
  Year { year: i32 },
}

impl DateFilter {
  pub fn range(from: &str, to: &str) -> Result<Self> {
    Ok(Self::Range { from: parse_date(from)?, to: parse_date(to)? })
  }

  pub fn month(month: &str, year: &str) -> Result<Self> {
    Ok(Self::Month { month: parse_month(month)?, year: parse_year(year)? })
  }

  pub fn year(year: &str) -> Result<Self> {
    Ok(Self::Year { year: parse_year(year)? })
  }

  /// The preset window: the last [`DEFAULT_WINDOW_DAYS`] days up to `today`.
  pub fn recent(today: NaiveDate) -> Self {
    Self::Range { from: today - Duration::days(DEFAULT_WINDOW_DAYS), to: today }
  }

  /// Human-readable scope for result totals, e.g. `"IN THE YEAR 2024"`.
  pub fn describe(&self) -> String {
    match self {
      Self::Range { from, to } => format!(
        "FROM {} TO {}",
        from.format(DATE_FORMAT),
        to.format(DATE_FORMAT)
      ),
      Self::Month { month, year } => {
        format!("IN THE MONTH-YEAR({month:02}-{year:04})")
      }
      Self::Year { year } => format!("IN THE YEAR {year:04}"),
    }
  }

  /// Whether an ISO date string falls inside this filter.
  ///
  /// Mirrors the SQL predicate; unparseable values never match.
  pub fn matches(&self, iso: &str) -> bool {
    let Ok(date) = NaiveDate::parse_from_str(iso.trim(), ISO_DATE_FORMAT) else {
      return false;
    };
    match *self {
      Self::Range { from, to } => from <= date && date <= to,
      Self::Month { month, year } => date.month() == month && date.year() == year,
      Self::Year { year } => date.year() == year,
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::RecordStore::query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateQuery {
  pub register: Register,
  /// Date column to filter on; the register's designated date field if unset.
  pub field:    Option<String>,
  pub filter:   DateFilter,
}

impl DateQuery {
  pub fn new(register: Register, filter: DateFilter) -> Self {
    Self { register, field: None, filter }
  }

  pub fn on_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }

  /// Total line as shown above a result table.
  pub fn summary(&self, count: usize) -> String {
    format!("TOTAL: {count} {} {}", self.register.label(), self.filter.describe())
  }
}

/// Result of a date query: the match count and the rows themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
  pub count:   usize,
  pub results: ResultSet,
}

impl From<ResultSet> for QueryOutcome {
  fn from(results: ResultSet) -> Self {
    Self { count: results.len(), results }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn parses_day_first_dates() {
    assert_eq!(parse_date("05-01-2024").unwrap(), d(2024, 1, 5));
    assert_eq!(parse_date("28/02/2024").unwrap(), d(2024, 2, 28));
    assert!(matches!(parse_date("2024-01-05"), Err(Error::InvalidDate(_))));
    assert!(parse_date("31-02-2024").is_err());
  }

  #[test]
  fn month_and_year_are_validated() {
    assert_eq!(
      DateFilter::month("02", "2024").unwrap(),
      DateFilter::Month { month: 2, year: 2024 }
    );
    assert!(DateFilter::month("2", "2024").is_ok());
    assert!(matches!(DateFilter::month("13", "2024"), Err(Error::InvalidMonth(_))));
    assert!(matches!(DateFilter::month("001", "2024"), Err(Error::InvalidMonth(_))));
    assert!(matches!(DateFilter::year("24"), Err(Error::InvalidYear(_))));
    assert!(matches!(DateFilter::year("20a4"), Err(Error::InvalidYear(_))));
  }

  #[test]
  fn range_compares_real_dates() {
    // Lexically "01-03-2024" sorts between these bounds; by date it does not.
    let filter = DateFilter::range("01-01-2024", "28-02-2024").unwrap();
    assert!(filter.matches("2024-01-05"));
    assert!(filter.matches("2024-02-10"));
    assert!(filter.matches("2024-02-28"));
    assert!(!filter.matches("2024-03-01"));
    assert!(!filter.matches("05-01-2024"));
  }

  #[test]
  fn month_and_year_matching() {
    let month = DateFilter::month("02", "2024").unwrap();
    assert!(month.matches("2024-02-10"));
    assert!(!month.matches("2023-02-10"));
    assert!(DateFilter::year("2024").unwrap().matches("2024-12-31"));
  }

  #[test]
  fn recent_window_ends_today() {
    let today = d(2024, 3, 15);
    assert_eq!(
      DateFilter::recent(today),
      DateFilter::Range { from: d(2024, 2, 14), to: today }
    );
  }

  #[test]
  fn summaries_read_like_totals() {
    let q = DateQuery::new(Register::SentToDpp, DateFilter::year("2017").unwrap());
    assert_eq!(q.summary(3), "TOTAL: 3 FILES SENT TO DPP IN THE YEAR 2017");

    let q = DateQuery::new(Register::PutAway, DateFilter::month("1", "2018").unwrap());
    assert_eq!(q.summary(0), "TOTAL: 0 PUT AWAY FILES IN THE MONTH-YEAR(01-2018)");

    let q = DateQuery::new(
      Register::CourtGoing,
      DateFilter::range("01-01-2024", "28-02-2024").unwrap(),
    );
    assert_eq!(
      q.summary(2),
      "TOTAL: 2 COURT GOING FILES FROM 01-01-2024 TO 28-02-2024"
    );
  }
}
