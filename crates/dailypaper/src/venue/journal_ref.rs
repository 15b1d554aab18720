//! Rules for the semi-structured `journal_ref` field.

use super::*;

/// Words that make a whole `journal_ref` acceptable as a venue label.
const VENUE_INDICATORS: &[&str] = &[
  "conference",
  "journal",
  "proceedings",
  "transactions",
  "letters",
  "review",
  "symposium",
  "workshop",
];

lazy_static! {
  /// `<name> (<ACRONYM>[ <digits>])[,] [<year>]`
  static ref PARENTHESIZED_ACRONYM: Regex =
    Regex::new(r"([^()]*)\s*\(([A-Za-z]{2,})\s*(\d+)?\)\s*,?\s*(\d{4})?").unwrap();
}

/// Matches `journal_ref` against the acronym allow-list, then against venue-like wording.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct JournalRefMatcher;

impl JournalRefMatcher {
  /// Resolves a trimmed, non-empty `journal_ref`.
  pub(super) fn resolve(&self, table: &VenueTable, journal_ref: &str) -> Option<(String, VenueOrigin)> {
    if let Some(venue) = Self::parenthesized_acronym(table, journal_ref) {
      return Some((venue, VenueOrigin::JournalRefAcronym));
    }
    Self::verbatim(journal_ref).map(|venue| (venue, VenueOrigin::JournalRefVerbatim))
  }

  /// Composes `"<name> (<ACRONYM> <year>)"` when the first parenthesized word is a known acronym.
  ///
  /// The year is the one following the parentheses, or a four-digit year inside them.
  fn parenthesized_acronym(table: &VenueTable, journal_ref: &str) -> Option<String> {
    let caps = PARENTHESIZED_ACRONYM.captures(journal_ref)?;
    let acronym = table.canonical_acronym(caps.get(2)?.as_str())?;
    let name = caps.get(1).map_or("", |m| m.as_str().trim());
    let year = caps
      .get(4)
      .or_else(|| caps.get(3).filter(|inner| inner.as_str().len() == 4))
      .map(|m| m.as_str());

    let label = match year {
      Some(year) => format!("{acronym} {year}"),
      None => acronym.to_string(),
    };
    let venue = if name.is_empty() { label } else { format!("{name} ({label})") };

    (venue.chars().count() <= MAX_VENUE_LEN).then_some(venue)
  }

  /// Accepts the whole reference when it is short and names a kind of venue.
  fn verbatim(journal_ref: &str) -> Option<String> {
    let len = journal_ref.chars().count();
    if len <= 3 || len > MAX_VENUE_LEN {
      return None;
    }
    let lower = journal_ref.to_lowercase();
    VENUE_INDICATORS
      .iter()
      .any(|word| lower.contains(word))
      .then(|| journal_ref.to_string())
  }
}
