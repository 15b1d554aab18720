//! Applies venue inference and topic tagging to freshly fetched records.

use super::*;
use crate::{
  config::Config,
  tagger::{CategoryKeywordMap, TopicTagger},
  venue::{VenueResolver, VenueTable},
};

/// A venue resolver and a topic tagger, configured once and applied to every record.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dailypaper::{
///   enrich::Enricher, paper::PaperRecord, tagger::CategoryKeywordMap, venue::VenueTable,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let keywords = CategoryKeywordMap::from([("Robotics".into(), vec!["robot".into()])]);
/// let enricher = Enricher::new(VenueTable::default(), &keywords)?;
///
/// let mut paper = PaperRecord::new(
///   "2510.00001v1",
///   "Teaching a robot to fold laundry",
///   "We present...",
///   NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
/// );
/// paper.comment = Some("8 pages. Accepted at ICRA 2026".into());
///
/// let paper = enricher.enrich(paper);
/// assert_eq!(paper.venue.as_deref(), Some("ICRA 2026"));
/// assert!(paper.tags.contains("Robotics"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Enricher {
  /// Venue inference
  resolver: VenueResolver,
  /// Topic tags
  tagger:   TopicTagger,
}

impl Enricher {
  /// Builds an enricher from explicit venue lists and keywords.
  pub fn new(table: VenueTable, keywords: &CategoryKeywordMap) -> Result<Self> {
    Ok(Self { resolver: VenueResolver::new(table)?, tagger: TopicTagger::new(keywords) })
  }

  /// Builds an enricher from the `[venues]` and `[categories]` sections of `config`.
  pub fn from_config(config: &Config) -> Result<Self> {
    let enricher = Self::new(config.venue_table(), &config.keyword_map())?;
    debug!(
      "Enricher ready with {} acronyms and {} tag categories",
      enricher.resolver.table().acronyms().len(),
      enricher.tagger.len()
    );
    Ok(enricher)
  }

  /// The venue resolver in use.
  pub fn resolver(&self) -> &VenueResolver { &self.resolver }

  /// The topic tagger in use.
  pub fn tagger(&self) -> &TopicTagger { &self.tagger }

  /// Sets `venue` and `tags` on a record.
  ///
  /// Any previously set values are overwritten.
  pub fn enrich(&self, mut paper: PaperRecord) -> PaperRecord {
    paper.venue = self.resolver.resolve(paper.journal_ref.as_deref(), paper.comment.as_deref());
    paper.tags = self.tagger.tag(&paper.title, &paper.abstract_text);
    trace!("Enriched {}: venue={:?} tags={:?}", paper.id, paper.venue, paper.tags);
    paper
  }

  /// Enriches every record of a batch, preserving order.
  pub fn enrich_all(&self, papers: impl IntoIterator<Item = PaperRecord>) -> Vec<PaperRecord> {
    papers.into_iter().map(|paper| self.enrich(paper)).collect()
  }
}
