//! Venue inference from free-form bibliographic fields.
//!
//! arXiv records carry two optional, author-written strings that hint at where a paper was
//! published: `journal_ref` (semi-structured, e.g. `"The International Conference on Pattern
//! Recognition (ICPR),2024"`) and `comment` (anything at all, e.g. `"12 pages, 5 figures.
//! Accepted at CVPR 2025"`). [`VenueResolver`] turns them into a single normalized label or
//! `None`, which the rest of the system treats as "preprint".
//!
//! The journal reference is tried first. The comment is cleaned of page/figure counts and
//! links, checked for an explicit preprint marker, and then run through an ordered ladder of
//! [`CommentRule`]s from most to least descriptive; the first rule that produces a label wins.
//!
//! # Examples
//!
//! ```
//! use dailypaper::venue::{VenueResolver, VenueTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = VenueResolver::new(VenueTable::default())?;
//!
//! let venue = resolver.resolve(None, Some("10 pages, 3 figures. Accepted at NeurIPS 2025."));
//! assert_eq!(venue.as_deref(), Some("NeurIPS 2025"));
//!
//! // Acronyms come back in canonical casing.
//! assert_eq!(resolver.resolve(None, Some("see our cvpr 2024 paper")).as_deref(), Some("CVPR 2024"));
//!
//! assert_eq!(resolver.resolve(None, None), None);
//! # Ok(())
//! # }
//! ```

use super::*;

mod comment;
mod journal_ref;

pub use comment::{clean_comment, CommentRule};
use comment::CommentMatcher;
use journal_ref::JournalRefMatcher;

/// Longest venue label ever returned.
pub const MAX_VENUE_LEN: usize = 200;

/// Conference acronyms recognised out of the box, in canonical casing.
pub const DEFAULT_ACRONYMS: &[&str] = &[
  "CVPR",
  "ICCV",
  "ECCV",
  "NeurIPS",
  "ICML",
  "ICLR",
  "ACL",
  "EMNLP",
  "NAACL",
  "AAAI",
  "IJCAI",
  "KDD",
  "ICRA",
  "IROS",
  "CoRL",
  "RSS",
  "ICPR",
  "SIGIR",
  "WWW",
  "WSDM",
  "RecSys",
  "SIGMOD",
  "VLDB",
  "ICDE",
  "SIGGRAPH",
  "ICASSP",
  "INTERSPEECH",
];

/// Journal names and publisher words that mark a comment as a journal publication.
pub const DEFAULT_JOURNALS: &[&str] =
  &["Nature", "Science", "PAMI", "TPAMI", "JMLR", "IJCV", "IEEE", "ACM", "Transactions", "Journal"];

/// The allow-lists venue inference is anchored to.
///
/// Built once (from the defaults or from configuration) and shared read-only by every
/// resolution afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueTable {
  /// Known conference acronyms in canonical casing
  acronyms: Vec<String>,
  /// Known journal keywords
  journals: Vec<String>,
}

impl Default for VenueTable {
  fn default() -> Self {
    Self {
      acronyms: DEFAULT_ACRONYMS.iter().map(|s| s.to_string()).collect(),
      journals: DEFAULT_JOURNALS.iter().map(|s| s.to_string()).collect(),
    }
  }
}

impl VenueTable {
  /// Replaces the acronym list. Blank entries and case-insensitive repeats are dropped.
  pub fn with_acronyms(mut self, acronyms: impl IntoIterator<Item = String>) -> Self {
    self.acronyms = dedup_case_insensitive(acronyms);
    self
  }

  /// Replaces the journal keyword list. Blank entries and case-insensitive repeats are dropped.
  pub fn with_journals(mut self, journals: impl IntoIterator<Item = String>) -> Self {
    self.journals = dedup_case_insensitive(journals);
    self
  }

  /// Known acronyms in priority order.
  pub fn acronyms(&self) -> &[String] { &self.acronyms }

  /// Known journal keywords in priority order.
  pub fn journals(&self) -> &[String] { &self.journals }

  /// Looks an acronym up case-insensitively and returns its canonical spelling.
  pub fn canonical_acronym(&self, candidate: &str) -> Option<&str> {
    self.acronyms.iter().find(|a| a.eq_ignore_ascii_case(candidate)).map(String::as_str)
  }
}

/// Trims entries and drops blanks and case-insensitive repeats, keeping first occurrences.
fn dedup_case_insensitive(items: impl IntoIterator<Item = String>) -> Vec<String> {
  let mut seen = BTreeSet::new();
  items
    .into_iter()
    .map(|item| item.trim().to_string())
    .filter(|item| !item.is_empty() && seen.insert(item.to_lowercase()))
    .collect()
}

/// Which step of the resolution produced a venue, or why none was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueOrigin {
  /// A known acronym in parentheses inside `journal_ref`
  JournalRefAcronym,
  /// `journal_ref` taken verbatim because it reads like a venue name
  JournalRefVerbatim,
  /// One of the comment rules
  Comment(CommentRule),
  /// The comment declares the paper a preprint
  PreprintMarker,
  /// Nothing matched
  Unmatched,
}

/// A venue together with the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
  /// The inferred venue, `None` for preprints
  pub venue:  Option<String>,
  /// How the outcome was reached
  pub origin: VenueOrigin,
}

impl Resolution {
  /// A resolution without a venue.
  fn none(origin: VenueOrigin) -> Self { Self { venue: None, origin } }
}

/// Derives a publication venue from `journal_ref` and `comment`.
///
/// All patterns are compiled up front in [`VenueResolver::new`]; resolving is then pure and
/// the resolver can be shared across threads.
#[derive(Debug, Clone)]
pub struct VenueResolver {
  /// The lists this resolver was built from
  table:       VenueTable,
  /// Rules for the `journal_ref` field
  journal_ref: JournalRefMatcher,
  /// Rules for the `comment` field
  comment:     CommentMatcher,
}

impl VenueResolver {
  /// Compiles the per-acronym patterns for `table`.
  ///
  /// # Errors
  ///
  /// Returns [`DailyPaperError::Regex`] if a pattern built from the table cannot be compiled,
  /// e.g. because a configured list is so large it exceeds the regex size limit.
  pub fn new(table: VenueTable) -> Result<Self> {
    let comment = CommentMatcher::new(&table)?;
    Ok(Self { journal_ref: JournalRefMatcher, comment, table })
  }

  /// The allow-lists in use.
  pub fn table(&self) -> &VenueTable { &self.table }

  /// Infers a venue, preferring `journal_ref` over `comment`.
  ///
  /// Blank inputs count as absent. Returns `None` when neither field yields a confident
  /// match; the result is otherwise a non-empty string of at most [`MAX_VENUE_LEN`] characters.
  pub fn resolve(&self, journal_ref: Option<&str>, comment: Option<&str>) -> Option<String> {
    self.explain(journal_ref, comment).venue
  }

  /// Like [`resolve`](Self::resolve), but also reports which step produced the result.
  pub fn explain(&self, journal_ref: Option<&str>, comment: Option<&str>) -> Resolution {
    if let Some(journal_ref) = non_blank(journal_ref) {
      if let Some((venue, origin)) = self.journal_ref.resolve(&self.table, journal_ref) {
        if let Some(venue) = bounded(venue) {
          trace!("Venue {venue:?} from journal_ref via {origin:?}");
          return Resolution { venue: Some(venue), origin };
        }
      }
    }

    let Some(comment) = non_blank(comment) else {
      return Resolution::none(VenueOrigin::Unmatched);
    };

    let cleaned = clean_comment(comment);
    if comment::is_preprint_marker(&cleaned) {
      trace!("Comment {comment:?} marks a preprint");
      return Resolution::none(VenueOrigin::PreprintMarker);
    }

    CommentRule::LADDER
      .iter()
      .find_map(|rule| {
        self.comment.apply(*rule, &self.table, &cleaned).and_then(bounded).map(|venue| {
          trace!("Venue {venue:?} from comment via {rule:?}");
          Resolution { venue: Some(venue), origin: VenueOrigin::Comment(*rule) }
        })
      })
      .unwrap_or_else(|| Resolution::none(VenueOrigin::Unmatched))
  }
}

/// Treats empty and whitespace-only input as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|value| !value.is_empty())
}

/// Enforces the venue invariant: non-empty and at most [`MAX_VENUE_LEN`] characters.
fn bounded(venue: String) -> Option<String> {
  let venue = venue.trim();
  (!venue.is_empty() && venue.chars().count() <= MAX_VENUE_LEN).then(|| venue.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn resolver() -> VenueResolver { VenueResolver::new(VenueTable::default()).unwrap() }

  #[test]
  fn test_absent_inputs() {
    let r = resolver();
    assert_eq!(r.resolve(None, None), None);
    assert_eq!(r.resolve(Some(""), Some("   ")), None);
    assert_eq!(r.explain(Some("\t"), None).origin, VenueOrigin::Unmatched);
  }

  #[test]
  fn test_journal_ref_wins_over_comment() {
    let r = resolver();
    for comment in [None, Some("Accepted at CVPR 2025"), Some("This is a preprint.")] {
      let resolution = r.explain(Some("The Conf (ICPR),2024"), comment);
      assert_eq!(resolution.venue.as_deref(), Some("The Conf (ICPR 2024)"));
      assert_eq!(resolution.origin, VenueOrigin::JournalRefAcronym);
    }
  }

  #[test]
  fn test_falls_through_to_comment() {
    let r = resolver();
    let resolution = r.explain(Some("Some unrelated note"), Some("Camera-ready for ICML 2024"));
    assert_eq!(resolution.venue.as_deref(), Some("ICML 2024"));
    assert_eq!(resolution.origin, VenueOrigin::Comment(CommentRule::AcronymWithQualifier));
  }

  #[test]
  fn test_accepted_phrase_after_noise() {
    let r = resolver();
    let venue = r.resolve(None, Some("10 pages, 3 figures. Accepted at NeurIPS 2025.")).unwrap();
    assert!(venue.contains("NeurIPS 2025"));
  }

  #[test]
  fn test_preprint_marker() {
    let r = resolver();
    let resolution = r.explain(None, Some("This is a preprint."));
    assert_eq!(resolution.venue, None);
    assert_eq!(resolution.origin, VenueOrigin::PreprintMarker);

    // The marker wins over an acronym mentioned elsewhere.
    assert_eq!(r.resolve(None, Some("Preprint; extends our CVPR 2023 workshop paper")), None);

    // ...unless the comment also says "accepted".
    assert!(r.resolve(None, Some("Preprint, accepted at ICML 2024")).is_some());
  }

  #[test]
  fn test_canonical_casing() {
    let r = resolver();
    assert_eq!(r.resolve(None, Some("neurips 2024 spotlight")).as_deref(), Some("NeurIPS 2024"));
    assert_eq!(r.resolve(None, Some("iclr")).as_deref(), Some("ICLR"));
    assert_eq!(r.resolve(Some("Proc. of the thing (corl) 2023"), None).as_deref(), Some("Proc. of the thing (CoRL 2023)"));
  }

  #[test]
  fn test_length_invariant() {
    let r = resolver();
    let long_name = "Very ".repeat(60);
    let inputs = [
      (Some(format!("{long_name}Long Conference (CVPR), 2024")), None),
      (Some(format!("Journal of {long_name}")), None),
      (None, Some(format!("Published in the Journal of {long_name}"))),
      (None, Some(format!("IEEE {long_name}"))),
    ];
    for (journal_ref, comment) in inputs {
      if let Some(venue) = r.resolve(journal_ref.as_deref(), comment.as_deref()) {
        assert!(!venue.is_empty());
        assert!(venue.chars().count() <= MAX_VENUE_LEN, "{venue}");
      }
    }
  }

  #[test]
  fn test_idempotent() {
    let r = resolver();
    let cases = [
      (Some("IEEE Transactions on Robotics, 2024"), None),
      (None, Some("Accepted to the 41st International Conference on Machine Learning")),
      (None, Some("Under review")),
    ];
    for (journal_ref, comment) in cases {
      assert_eq!(r.resolve(journal_ref, comment), r.resolve(journal_ref, comment));
    }
  }

  #[test]
  fn test_custom_table() {
    let table = VenueTable::default().with_acronyms(vec!["CRYPTO".into(), "crypto".into(), " ".into()]);
    assert_eq!(table.acronyms(), &["CRYPTO".to_string()]);

    let r = VenueResolver::new(table).unwrap();
    assert_eq!(r.resolve(None, Some("crypto 2024")).as_deref(), Some("CRYPTO 2024"));
    assert_eq!(r.resolve(None, Some("CVPR 2024")), None);
  }

  #[test]
  fn test_resolver_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VenueResolver>();
  }
}
