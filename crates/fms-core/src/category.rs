//! Record categories and the registers offered by date queries.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator as _};

use crate::{
  Error,
  schema::{ALLOCATION, COURT_GOING, FILES_SENT, PUT_AWAY, RecordSchema},
};

/// One file-tracking domain. Each category owns exactly one table.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr,
  Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
  /// Files sent to the DPP or the RSA for review.
  FilesSent,
  CourtGoing,
  PutAway,
  /// Files allocated to investigators.
  Allocation,
}

impl Category {
  pub fn schema(self) -> &'static RecordSchema {
    match self {
      Self::FilesSent => &FILES_SENT,
      Self::CourtGoing => &COURT_GOING,
      Self::PutAway => &PUT_AWAY,
      Self::Allocation => &ALLOCATION,
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      Self::FilesSent => "Files Sent to DPP/RSA",
      Self::CourtGoing => "Court Going Files",
      Self::PutAway => "Put Away Files",
      Self::Allocation => "Allocation To Investigators",
    }
  }
}

impl FromStr for Category {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::iter()
      .find(|c| c.as_ref().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| Error::UnknownCategory(s.to_owned()))
  }
}

// ─── Register ────────────────────────────────────────────────────────────────

/// Value of `FILE_SENT_TO` for files under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Destination {
  Dpp,
  Rsa,
}

impl Destination {
  pub const COLUMN: &'static str = "FILE_SENT_TO";
}

/// A category as offered to the date query builder.
///
/// The files-sent table shows up twice, once per review destination.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr,
  Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Register {
  SentToDpp,
  SentToRsa,
  PutAway,
  Allocation,
  CourtGoing,
}

impl Register {
  pub fn category(self) -> Category {
    match self {
      Self::SentToDpp | Self::SentToRsa => Category::FilesSent,
      Self::PutAway => Category::PutAway,
      Self::Allocation => Category::Allocation,
      Self::CourtGoing => Category::CourtGoing,
    }
  }

  /// Fixed `FILE_SENT_TO` narrowing, if this register has one.
  pub fn destination(self) -> Option<Destination> {
    match self {
      Self::SentToDpp => Some(Destination::Dpp),
      Self::SentToRsa => Some(Destination::Rsa),
      _ => None,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::SentToDpp => "FILES SENT TO DPP",
      Self::SentToRsa => "FILES SENT TO RSA",
      Self::PutAway => "PUT AWAY FILES",
      Self::Allocation => "FILES ALLOCATED TO INVESTIGATORS",
      Self::CourtGoing => "COURT GOING FILES",
    }
  }
}

impl FromStr for Register {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    Self::iter()
      .find(|r| r.as_ref().eq_ignore_ascii_case(s) || r.label().eq_ignore_ascii_case(s))
      .ok_or_else(|| Error::UnknownCategory(s.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn categories_parse_from_kebab_case() {
    assert_eq!("put-away".parse::<Category>().unwrap(), Category::PutAway);
    assert_eq!("Court-Going".parse::<Category>().unwrap(), Category::CourtGoing);
    assert!(matches!(
      "archive".parse::<Category>(),
      Err(Error::UnknownCategory(s)) if s == "archive"
    ));
    assert_eq!(Category::FilesSent.to_string(), "files-sent");
  }

  #[test]
  fn each_category_has_its_own_table() {
    let tables: Vec<_> = Category::iter().map(|c| c.schema().table_name).collect();
    assert_eq!(tables, ["files_sent_to_dpp", "court_going", "putaway", "allocation"]);
  }

  #[test]
  fn sent_registers_share_one_table() {
    assert_eq!(Register::SentToDpp.category(), Register::SentToRsa.category());
    assert_eq!(Register::SentToDpp.destination(), Some(Destination::Dpp));
    assert_eq!(Register::SentToRsa.destination().unwrap().to_string(), "RSA");
    assert_eq!(Register::PutAway.destination(), None);
  }

  #[test]
  fn registers_parse_from_name_or_label() {
    assert_eq!("sent-to-rsa".parse::<Register>().unwrap(), Register::SentToRsa);
    assert_eq!(
      "files allocated to investigators".parse::<Register>().unwrap(),
      Register::Allocation
    );
  }
}
