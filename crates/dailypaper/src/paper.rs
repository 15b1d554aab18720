//! The paper record that flows from the retriever, through enrichment, into the store.
//!
//! A [`PaperRecord`] is built once from a fetched feed entry, passed through
//! [`Enricher::enrich`](crate::enrich::Enricher::enrich) exactly once to fill in
//! [`venue`](PaperRecord::venue) and [`tags`](PaperRecord::tags), and then serialized. Records
//! are never modified after they have been stored.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use dailypaper::paper::PaperRecord;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
//! let paper = PaperRecord::new("2510.00001v1", "A Paper", "An abstract.", date);
//!
//! assert!(!paper.is_published());
//! assert_eq!(paper.month(), "2025-10");
//! assert_eq!(paper.pdf_url, "https://arxiv.org/pdf/2510.00001v1.pdf");
//! ```

use super::*;

/// Label stored in [`PaperRecord::source`] for everything fetched from arXiv.
pub const ARXIV_SOURCE: &str = "arXiv";

/// Complete representation of a harvested paper.
///
/// The first block of fields is copied verbatim from the feed. `venue` and `tags` are derived
/// by the enrichment stage; a record whose `venue` is `None` is treated as a preprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
  /// Source-specific identifier, e.g. `2510.01234v1`
  pub id:               String,
  /// The paper's title with whitespace normalized
  pub title:            String,
  /// Author names in the order listed by the source
  pub authors:          Vec<String>,
  /// Full abstract with whitespace normalized
  #[serde(rename = "abstract")]
  pub abstract_text:    String,
  /// Date of the first version
  pub published:        NaiveDate,
  /// Date of the latest version
  pub updated:          NaiveDate,
  /// Every subject category attached to the paper
  pub categories:       Vec<String>,
  /// The category the paper was primarily filed under
  pub primary_category: String,
  /// Direct link to the PDF
  pub pdf_url:          String,
  /// Link to the abstract page
  pub arxiv_url:        String,
  /// Repository the record was harvested from
  #[serde(default = "default_source")]
  pub source:           String,
  /// The category query that surfaced this record during harvesting
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub listing_category: Option<String>,
  /// Raw author-supplied comment
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comment:          Option<String>,
  /// Raw journal reference
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub journal_ref:      Option<String>,
  /// Inferred publication venue, `None` for preprints
  #[serde(default)]
  pub venue:            Option<String>,
  /// Topic tags from keyword matching
  #[serde(default)]
  pub tags:             BTreeSet<String>,
}

/// Serde default for [`PaperRecord::source`] when reading older data.
fn default_source() -> String { ARXIV_SOURCE.to_string() }

impl PaperRecord {
  /// Creates a bare arXiv record with derived links and no enrichment.
  ///
  /// `updated` starts out equal to `published`, and the PDF and abstract links are
  /// constructed from the identifier. Callers fill in the remaining fields directly.
  pub fn new(
    id: impl Into<String>,
    title: impl Into<String>,
    abstract_text: impl Into<String>,
    published: NaiveDate,
  ) -> Self {
    let id = id.into();
    Self {
      pdf_url: format!("https://arxiv.org/pdf/{id}.pdf"),
      arxiv_url: format!("https://arxiv.org/abs/{id}"),
      id,
      title: title.into(),
      authors: Vec::new(),
      abstract_text: abstract_text.into(),
      published,
      updated: published,
      categories: Vec::new(),
      primary_category: String::new(),
      source: default_source(),
      listing_category: None,
      comment: None,
      journal_ref: None,
      venue: None,
      tags: BTreeSet::new(),
    }
  }

  /// Whether a venue was inferred for this paper.
  pub fn is_published(&self) -> bool { self.venue.is_some() }

  /// The `YYYY-MM` bucket this paper belongs to.
  pub fn month(&self) -> String { self.published.format("%Y-%m").to_string() }

  /// Formats the author list, truncating with "et al." after `max` names.
  ///
  /// ```
  /// # use chrono::NaiveDate;
  /// # use dailypaper::paper::PaperRecord;
  /// # let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
  /// let mut paper = PaperRecord::new("1", "t", "a", date);
  /// paper.authors = vec!["A".into(), "B".into(), "C".into()];
  /// assert_eq!(paper.format_authors(2), "A, B et al.");
  /// assert_eq!(paper.format_authors(3), "A, B, C");
  /// ```
  pub fn format_authors(&self, max: usize) -> String {
    if self.authors.len() <= max {
      self.authors.join(", ")
    } else {
      format!("{} et al.", self.authors[..max].join(", "))
    }
  }
}
