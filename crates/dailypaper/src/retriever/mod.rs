//! Fetching new papers from arXiv.
//!
//! The retriever is split in two:
//!
//! - [`PaperSource`] abstracts "give me the newest papers of one category". [`ArxivClient`] is
//!   the real implementation, talking to the arXiv Atom API; tests substitute their own.
//! - [`Harvester`] drives a source over every configured category, filters by recency, runs
//!   each record through the [`Enricher`] and collects a deduplicated batch.
//!
//! # Examples
//!
//! ```no_run
//! use dailypaper::{
//!   config::Config,
//!   enrich::Enricher,
//!   retriever::{ArxivClient, Harvester},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::bundled()?;
//! let client = ArxivClient::new(&config.sources.arxiv.base_url)?;
//! let enricher = Enricher::from_config(&config)?;
//!
//! let papers = Harvester::new(&client, &enricher)
//!   .with_delay(std::time::Duration::from_secs(3))
//!   .harvest(&config.sources.arxiv, chrono::Utc::now())
//!   .await;
//! println!("{} new papers", papers.len());
//! # Ok(())
//! # }
//! ```

use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use url::Url;

use super::*;
use crate::{config::ArxivSource, enrich::Enricher, paper::ARXIV_SOURCE};

pub mod atom;

/// A repository that lists recent papers per subject category.
#[async_trait]
pub trait PaperSource: Send + Sync {
  /// Human-readable name used in logs.
  fn name(&self) -> &str;

  /// Fetches up to `max_results` of the most recently submitted papers in `category`.
  ///
  /// Returned records are not enriched.
  async fn fetch_category(&self, category: &str, max_results: usize) -> Result<Vec<PaperRecord>>;
}

/// Client for the arXiv Atom query API.
#[derive(Debug, Clone)]
pub struct ArxivClient {
  /// Shared HTTP client
  client:   reqwest::Client,
  /// Query endpoint
  base_url: Url,
}

impl ArxivClient {
  /// Creates a client for the endpoint at `base_url`.
  ///
  /// # Errors
  ///
  /// Fails if `base_url` is not a valid URL or the HTTP client cannot be initialized.
  pub fn new(base_url: &str) -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(concat!("dailypaper/", env!("CARGO_PKG_VERSION")))
      .timeout(Duration::from_secs(60))
      .build()?;
    Ok(Self { client, base_url: Url::parse(base_url)? })
  }

  /// The listing URL for `category`, newest submissions first.
  pub fn query_url(&self, category: &str, max_results: usize) -> Url {
    let mut url = self.base_url.clone();
    url
      .query_pairs_mut()
      .append_pair("search_query", &format!("cat:{category}"))
      .append_pair("start", "0")
      .append_pair("max_results", &max_results.to_string())
      .append_pair("sortBy", "submittedDate")
      .append_pair("sortOrder", "descending");
    url
  }
}

#[async_trait]
impl PaperSource for ArxivClient {
  fn name(&self) -> &str { ARXIV_SOURCE }

  async fn fetch_category(&self, category: &str, max_results: usize) -> Result<Vec<PaperRecord>> {
    let url = self.query_url(category, max_results);
    debug!("Fetching {category} via: {url}");

    let response = self.client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(DailyPaperError::ApiError(format!("arXiv returned {status} for {category}")));
    }

    let body = response.text().await?;
    trace!("{category} response: {} bytes", body.len());
    atom::parse_feed(&body, category)
  }
}

/// Runs a [`PaperSource`] over the configured categories and enriches what comes back.
pub struct Harvester<'a> {
  /// Where papers come from
  source:   &'a dyn PaperSource,
  /// Applied to every kept record
  enricher: &'a Enricher,
  /// Pause between consecutive category requests
  delay:    Duration,
}

impl<'a> Harvester<'a> {
  /// Creates a harvester without any pause between requests.
  pub fn new(source: &'a dyn PaperSource, enricher: &'a Enricher) -> Self {
    Self { source, enricher, delay: Duration::ZERO }
  }

  /// Waits `delay` between category requests, as the arXiv API terms ask of clients.
  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  /// Collects the recent papers of every category in `settings`.
  ///
  /// A paper is recent when its last update falls on or after the calendar day
  /// `settings.days_back` days before `now`. A category that fails to fetch is logged and
  /// skipped. A paper listed under several categories appears once, attributed to the first
  /// category that returned it. A disabled source yields an empty batch. A window reaching
  /// past the earliest representable date keeps every paper.
  pub async fn harvest(&self, settings: &ArxivSource, now: DateTime<Utc>) -> Vec<PaperRecord> {
    if !settings.enabled {
      info!("{} source is disabled", self.source.name());
      return Vec::new();
    }

    let cutoff = now
      .checked_sub_signed(chrono::Duration::days(i64::from(settings.days_back)))
      .map_or(NaiveDate::MIN, |start| start.date_naive());
    let mut seen = HashSet::new();
    let mut papers = Vec::new();

    for (i, category) in settings.categories.iter().enumerate() {
      if i > 0 && !self.delay.is_zero() {
        tokio::time::sleep(self.delay).await;
      }

      let fetched = match self.source.fetch_category(category, settings.max_results).await {
        Ok(fetched) => fetched,
        Err(e) => {
          warn!("Failed to fetch {category} from {}: {e}", self.source.name());
          continue;
        },
      };

      let listed = fetched.len();
      let recent: Vec<_> = fetched
        .into_iter()
        .filter(|paper| paper.updated >= cutoff)
        .filter(|paper| seen.insert(paper.id.clone()))
        .collect();
      info!("Fetched {} of {listed} papers from {category} (since {cutoff})", recent.len());

      papers.extend(self.enricher.enrich_all(recent));
    }

    info!("{} harvested {} papers in total", self.source.name(), papers.len());
    papers
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::{tagger::CategoryKeywordMap, venue::VenueTable};

  /// Serves canned records per category and remembers what was asked.
  #[derive(Default)]
  struct StubSource {
    listings: BTreeMap<String, Vec<PaperRecord>>,
    requests: Mutex<Vec<String>>,
  }

  #[async_trait]
  impl PaperSource for StubSource {
    fn name(&self) -> &str { "stub" }

    async fn fetch_category(&self, category: &str, _max_results: usize) -> Result<Vec<PaperRecord>> {
      self.requests.lock().unwrap().push(category.to_string());
      self
        .listings
        .get(category)
        .cloned()
        .ok_or_else(|| DailyPaperError::ApiError(format!("no listing for {category}")))
    }
  }

  fn paper(id: &str, updated: (i32, u32, u32)) -> PaperRecord {
    let date = NaiveDate::from_ymd_opt(updated.0, updated.1, updated.2).unwrap();
    let mut paper = PaperRecord::new(id, format!("Paper {id}"), "A transformer.", date);
    paper.comment = Some("Accepted at ICLR 2026".into());
    paper
  }

  fn settings(categories: &[&str]) -> ArxivSource {
    ArxivSource {
      categories: categories.iter().map(|c| c.to_string()).collect(),
      ..ArxivSource::default()
    }
  }

  fn enricher() -> Enricher {
    let keywords =
      CategoryKeywordMap::from([("Machine Learning".to_string(), vec!["transformer".to_string()])]);
    Enricher::new(VenueTable::default(), &keywords).unwrap()
  }

  fn now() -> DateTime<Utc> { "2025-10-02T06:00:00Z".parse().unwrap() }

  #[test]
  fn test_query_url() {
    let client = ArxivClient::new("http://export.arxiv.org/api/query").unwrap();
    let url = client.query_url("cs.CV", 50);
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![
      ("search_query".to_string(), "cat:cs.CV".to_string()),
      ("start".to_string(), "0".to_string()),
      ("max_results".to_string(), "50".to_string()),
      ("sortBy".to_string(), "submittedDate".to_string()),
      ("sortOrder".to_string(), "descending".to_string()),
    ]);
  }

  #[test]
  fn test_invalid_base_url() {
    assert!(matches!(ArxivClient::new("not a url"), Err(DailyPaperError::InvalidUrl(_))));
  }

  #[tokio::test]
  async fn test_harvest_filters_enriches_and_dedupes() {
    let source = StubSource {
      listings: BTreeMap::from([
        ("cs.LG".to_string(), vec![paper("a", (2025, 10, 2)), paper("old", (2025, 9, 20))]),
        ("cs.CV".to_string(), vec![paper("a", (2025, 10, 2)), paper("b", (2025, 10, 1))]),
      ]),
      ..Default::default()
    };
    let enricher = enricher();

    let papers =
      Harvester::new(&source, &enricher).harvest(&settings(&["cs.LG", "cs.CV"]), now()).await;

    let ids: Vec<_> = papers.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(papers.iter().all(|p| p.venue.as_deref() == Some("ICLR 2026")));
    assert!(papers.iter().all(|p| p.tags.contains("Machine Learning")));
  }

  #[traced_test]
  #[tokio::test]
  async fn test_failing_category_is_skipped() {
    let source = StubSource {
      listings: BTreeMap::from([("cs.CV".to_string(), vec![paper("b", (2025, 10, 2))])]),
      ..Default::default()
    };
    let enricher = enricher();

    let papers =
      Harvester::new(&source, &enricher).harvest(&settings(&["cs.XX", "cs.CV"]), now()).await;

    assert_eq!(papers.len(), 1);
    assert_eq!(*source.requests.lock().unwrap(), vec!["cs.XX", "cs.CV"]);
    assert!(logs_contain("Failed to fetch cs.XX"));
  }

  #[tokio::test]
  async fn test_disabled_source_fetches_nothing() {
    let source = StubSource::default();
    let enricher = enricher();
    let mut settings = settings(&["cs.CV"]);
    settings.enabled = false;

    assert!(Harvester::new(&source, &enricher).harvest(&settings, now()).await.is_empty());
    assert!(source.requests.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_days_back_widens_the_window() {
    let source = StubSource {
      listings: BTreeMap::from([("cs.CV".to_string(), vec![paper("old", (2025, 9, 28))])]),
      ..Default::default()
    };
    let enricher = enricher();
    let mut settings = settings(&["cs.CV"]);

    assert!(Harvester::new(&source, &enricher).harvest(&settings, now()).await.is_empty());

    settings.days_back = 7;
    assert_eq!(Harvester::new(&source, &enricher).harvest(&settings, now()).await.len(), 1);
  }

  #[tokio::test]
  async fn test_huge_days_back_keeps_everything() {
    let source = StubSource {
      listings: BTreeMap::from([("cs.CV".to_string(), vec![paper("ancient", (1991, 8, 14))])]),
      ..Default::default()
    };
    let enricher = enricher();
    let mut settings = settings(&["cs.CV"]);
    settings.days_back = 4_000_000_000;

    let papers = Harvester::new(&source, &enricher).harvest(&settings, now()).await;
    assert_eq!(papers.len(), 1);
  }
}
