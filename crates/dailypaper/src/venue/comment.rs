//! Rules for the free-text `comment` field.
//!
//! Comments mix venue announcements with boilerplate ("12 pages, 5 figures", project links).
//! [`clean_comment`] strips the boilerplate; [`CommentRule::LADDER`] then goes from the most
//! descriptive match to the least.

use super::*;

/// Characters kept when a journal-keyword comment has to be shortened.
const JOURNAL_SNIPPET_LEN: usize = 80;

lazy_static! {
  /// Boilerplate removed before any matching, applied in order.
  static ref NOISE: Vec<Regex> = [
    r"(?i)\d+\s*pages?[,;]?\s*",
    r"(?i)\d+\s*figures?[,;]?\s*",
    r"(?i)\d+\s*tables?[,;]?\s*",
    r"(?i)\d+\s*appendices[,;]?\s*",
    r"(?i)https?://[^\s,;]+",
    r"(?i)GitHub\s+link:?\s*",
  ]
  .iter()
  .map(|pattern| Regex::new(pattern).unwrap())
  .collect();

  /// Runs of whitespace.
  static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

  /// "accepted at ...", "published in ...", "to appear in ..." up to the next `.`, `,` or `;`.
  static ref ACCEPTED_PHRASE: Regex = Regex::new(
    r"(?i)(?:accepted?\s+(?:at\s+(?:the\s+)?|to\s+(?:the\s+)?|by\s+(?:the\s+)?|for\s+(?:the\s+)?)|published\s+(?:in\s+(?:the\s+)?|at\s+(?:the\s+)?|with\s+)|to\s+appear\s+(?:in\s+(?:the\s+)?|at\s+(?:the\s+)?))\s*(.+?)(?:[.,;]|\z)"
  )
  .unwrap();

  /// Trailing `, Place Name, XX[, YYY]`.
  static ref LOCATION_SUFFIX: Regex =
    Regex::new(r",\s*[A-Z][a-zA-Z\s,]+,\s*[A-Z]{2,}(?:\s*,\s*[A-Z]{2,4})?$").unwrap();
}

/// Removes page/figure/table/appendix counts, URLs and "GitHub link:" prefixes, then
/// collapses whitespace.
///
/// ```
/// use dailypaper::venue::clean_comment;
///
/// assert_eq!(
///   clean_comment("12 pages, 4 figures, Code: https://github.com/a/b  Accepted at ICLR"),
///   "Code: Accepted at ICLR"
/// );
/// ```
pub fn clean_comment(comment: &str) -> String {
  let stripped = NOISE
    .iter()
    .fold(comment.trim().to_string(), |text, pattern| pattern.replace_all(&text, "").into_owned());
  WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}

/// Whether a cleaned comment explicitly calls the paper a preprint.
///
/// Only the literal word "accepted" overrides the marker, so "not yet accepted" counts as
/// accepted too.
pub(super) fn is_preprint_marker(cleaned: &str) -> bool {
  let lower = cleaned.to_lowercase();
  lower.contains("preprint") && !lower.contains("accepted")
}

/// One rung of the comment ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentRule {
  /// "Accepted at/to/by/for ...", "Published in/at/with ...", "To appear in/at ..."
  AcceptedPhrase,
  /// `CVPR 2025, Main Conference` → `CVPR 2025`
  AcronymWithQualifier,
  /// `CVPR'25`-style separators: `CVPR: 2025`, `CVPR'2025`, `CVPR2025`
  AcronymYear,
  /// A known acronym on its own
  BareAcronym,
  /// A journal keyword anywhere; the first sentence is used as the label
  JournalKeyword,
}

impl CommentRule {
  /// Evaluation order; the first rule yielding a label wins.
  pub const LADDER: [CommentRule; 5] = [
    CommentRule::AcceptedPhrase,
    CommentRule::AcronymWithQualifier,
    CommentRule::AcronymYear,
    CommentRule::BareAcronym,
    CommentRule::JournalKeyword,
  ];
}

/// Patterns compiled for a single known acronym.
#[derive(Debug, Clone)]
struct AcronymPatterns {
  /// Canonical spelling
  acronym:        String,
  /// `ACR 2025` optionally followed by `, qualifier` or `- qualifier`
  with_qualifier: Regex,
  /// `ACR 2025`, `ACR:2025`, `ACR'2025`, `ACR2025`
  with_year:      Regex,
  /// `ACR` as a whole word
  bare:           Regex,
}

impl AcronymPatterns {
  /// Compiles the three patterns for `acronym`.
  fn new(acronym: &str) -> Result<Self> {
    let escaped = regex::escape(acronym);
    Ok(Self {
      acronym:        acronym.to_string(),
      with_qualifier: Regex::new(&format!(r"(?i)\b{escaped}\s+(\d{{4}})(?:\s*[,\-]\s*[\w\s]+)?"))?,
      with_year:      Regex::new(&format!(r"(?i)\b{escaped}\s*[:']?\s*(\d{{4}})\b"))?,
      bare:           Regex::new(&format!(r"(?i)\b{escaped}\b"))?,
    })
  }

  /// `"<ACRONYM> <year>"` from the year captured by `pattern`.
  fn with_captured_year(&self, pattern: &Regex, text: &str) -> Option<String> {
    let year = pattern.captures(text)?.get(1)?.as_str();
    Some(format!("{} {year}", self.acronym))
  }
}

/// Compiled comment rules for one [`VenueTable`].
#[derive(Debug, Clone)]
pub(super) struct CommentMatcher {
  /// One entry per known acronym, in table order
  acronyms: Vec<AcronymPatterns>,
}

impl CommentMatcher {
  /// Compiles patterns for every acronym of `table`.
  pub(super) fn new(table: &VenueTable) -> Result<Self> {
    let acronyms =
      table.acronyms().iter().map(|acronym| AcronymPatterns::new(acronym)).collect::<Result<_>>()?;
    Ok(Self { acronyms })
  }

  /// Runs a single rule against a cleaned comment.
  pub(super) fn apply(&self, rule: CommentRule, table: &VenueTable, cleaned: &str) -> Option<String> {
    match rule {
      CommentRule::AcceptedPhrase => accepted_phrase(cleaned),
      CommentRule::AcronymWithQualifier => self
        .acronyms
        .iter()
        .find_map(|patterns| patterns.with_captured_year(&patterns.with_qualifier, cleaned)),
      CommentRule::AcronymYear => self
        .acronyms
        .iter()
        .find_map(|patterns| patterns.with_captured_year(&patterns.with_year, cleaned)),
      CommentRule::BareAcronym => self
        .acronyms
        .iter()
        .find(|patterns| patterns.bare.is_match(cleaned))
        .map(|patterns| patterns.acronym.clone()),
      CommentRule::JournalKeyword => journal_keyword(table, cleaned),
    }
  }
}

/// The text after an acceptance/publication phrase, minus a trailing location.
fn accepted_phrase(cleaned: &str) -> Option<String> {
  let captured = ACCEPTED_PHRASE.captures(cleaned)?.get(1)?.as_str().trim();
  let venue = LOCATION_SUFFIX.replace(captured, "");
  let venue = venue.trim();
  let len = venue.chars().count();
  (len > 5 && len < MAX_VENUE_LEN).then(|| venue.to_string())
}

/// The first sentence (or an 80-character snippet) of a comment naming a known journal.
fn journal_keyword(table: &VenueTable, cleaned: &str) -> Option<String> {
  let lower = cleaned.to_lowercase();
  if !table.journals().iter().any(|journal| lower.contains(&journal.to_lowercase())) {
    return None;
  }

  // noise stripping can leave the comment starting with ". "
  let text = cleaned.trim_start_matches(|c: char| c == '.' || c.is_whitespace());
  let first_sentence = text.split('.').next().map(str::trim).filter(|s| !s.is_empty())?;
  if first_sentence.chars().count() <= JOURNAL_SNIPPET_LEN {
    return Some(first_sentence.to_string());
  }
  let snippet: String = text.chars().take(JOURNAL_SNIPPET_LEN).collect();
  Some(format!("{}...", snippet.trim_end()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn apply(rule: CommentRule, comment: &str) -> Option<String> {
    let table = VenueTable::default();
    CommentMatcher::new(&table).unwrap().apply(rule, &table, &clean_comment(comment))
  }

  #[test]
  fn test_clean_comment() {
    assert_eq!(clean_comment("10 pages, 3 figures. Accepted at NeurIPS 2025."), ". Accepted at NeurIPS 2025.");
    assert_eq!(clean_comment("5 tables; 2 appendices"), "");
    assert_eq!(clean_comment("GitHub link: https://github.com/x/y"), "");
    assert_eq!(clean_comment("  ICRA\n\n 2024  "), "ICRA 2024");
    assert_eq!(clean_comment("1 page"), "");
  }

  #[test]
  fn test_preprint_marker() {
    assert!(is_preprint_marker("This is a PREPRINT"));
    assert!(!is_preprint_marker("preprint accepted at ICML"));
    assert!(!is_preprint_marker("Preprint, not yet accepted"));
    assert!(!is_preprint_marker("Accepted at ICML"));
  }

  #[test]
  fn test_accepted_phrase_variants() {
    let cases = [
      ("Accepted at NeurIPS 2025.", "NeurIPS 2025"),
      ("accepted to the Conference on Robot Learning", "Conference on Robot Learning"),
      ("Accepted by IEEE Robotics and Automation Letters (RA-L)", "IEEE Robotics and Automation Letters (RA-L)"),
      ("Accepted for ICASSP 2025", "ICASSP 2025"),
      ("Published in Transactions on Machine Learning Research; camera ready", "Transactions on Machine Learning Research"),
      ("Published with Springer Nature", "Springer Nature"),
      ("To appear in the Proceedings of VLDB 2026", "Proceedings of VLDB 2026"),
      ("To appear at ICDE 2025, Hong Kong", "ICDE 2025"),
    ];
    for (comment, expected) in cases {
      assert_eq!(apply(CommentRule::AcceptedPhrase, comment).as_deref(), Some(expected), "{comment}");
    }
  }

  #[test]
  fn test_accepted_phrase_length_window() {
    // five characters or fewer is too short to be a venue
    assert_eq!(apply(CommentRule::AcceptedPhrase, "Accepted at ACL."), None);
    assert_eq!(apply(CommentRule::AcceptedPhrase, "Accepted at KDD25"), None);
    assert_eq!(apply(CommentRule::AcceptedPhrase, &format!("Accepted at {}", "x".repeat(MAX_VENUE_LEN))), None);
  }

  #[test]
  fn test_location_suffix_is_stripped() {
    assert_eq!(accepted_phrase("to appear in IEEE Big Data, Washington, DC, USA").as_deref(), Some("IEEE Big Data"));
    assert_eq!(LOCATION_SUFFIX.replace("Workshop, Seattle, WA", "").as_ref(), "Workshop");
  }

  #[test]
  fn test_acronym_rules() {
    assert_eq!(apply(CommentRule::AcronymWithQualifier, "CVPR 2025, Main Conference").as_deref(), Some("CVPR 2025"));
    assert_eq!(apply(CommentRule::AcronymWithQualifier, "eccv 2024 - oral").as_deref(), Some("ECCV 2024"));
    assert_eq!(apply(CommentRule::AcronymWithQualifier, "CVPR'2025"), None);

    assert_eq!(apply(CommentRule::AcronymYear, "CVPR'2025").as_deref(), Some("CVPR 2025"));
    assert_eq!(apply(CommentRule::AcronymYear, "At ICLR: 2024").as_deref(), Some("ICLR 2024"));
    assert_eq!(apply(CommentRule::AcronymYear, "KDD2023 industry track").as_deref(), Some("KDD 2023"));
    assert_eq!(apply(CommentRule::AcronymYear, "ICML"), None);

    assert_eq!(apply(CommentRule::BareAcronym, "Oral at recsys").as_deref(), Some("RecSys"));
    assert_eq!(apply(CommentRule::BareAcronym, "Workshop at ACLing"), None);
  }

  #[test]
  fn test_acronym_priority_follows_table_order() {
    // Both CVPR and ICCV are present; CVPR is listed first.
    assert_eq!(apply(CommentRule::AcronymWithQualifier, "ICCV 2023 and CVPR 2024").as_deref(), Some("CVPR 2024"));
  }

  #[test]
  fn test_journal_keyword() {
    assert_eq!(
      apply(CommentRule::JournalKeyword, "IEEE Transactions on Robotics. Extended version").as_deref(),
      Some("IEEE Transactions on Robotics")
    );

    let long = format!("Submitted to a Journal {}", "with a very long description ".repeat(5));
    let venue = apply(CommentRule::JournalKeyword, &long).unwrap();
    assert!(venue.ends_with("..."));
    assert!(venue.chars().count() <= JOURNAL_SNIPPET_LEN + 3);

    // the first sentence can be empty once the noise is gone
    assert_eq!(apply(CommentRule::JournalKeyword, "3 figures. Nature Physics").as_deref(), Some("Nature Physics"));

    let long = format!("3 figures. IEEE Transactions on {}", "Very Long Field Names ".repeat(5));
    let venue = apply(CommentRule::JournalKeyword, &long).unwrap();
    assert!(venue.starts_with("IEEE Transactions on Very Long"), "{venue}");
    assert!(venue.ends_with("..."));
    assert_eq!(venue.chars().count(), JOURNAL_SNIPPET_LEN + 3);

    assert_eq!(apply(CommentRule::JournalKeyword, "Work in progress"), None);
  }
}
