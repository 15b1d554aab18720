//! Daily arXiv harvesting with venue and topic inference.
//!
//! `dailypaper` is a library for building a static "what was published today" page over
//! arXiv, providing:
//!
//! - Paper metadata retrieval from the arXiv Atom API
//! - Venue inference from noisy `journal_ref` and `comment` fields
//! - Keyword-based topic tagging
//! - Append-only JSON storage with deduplication by identifier
//! - A static, client-side filterable HTML page
//!
//! # Getting Started
//!
//! ```no_run
//! use dailypaper::{config::Config, enrich::Enricher, retriever::{ArxivClient, Harvester}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_path("dailypaper.toml")?;
//! let enricher = Enricher::from_config(&config)?;
//! let client = ArxivClient::new(&config.sources.arxiv.base_url)?;
//!
//! let papers = Harvester::new(&client, &enricher)
//!   .harvest(&config.sources.arxiv, chrono::Utc::now())
//!   .await;
//! for paper in &papers {
//!   println!("{} -> {:?} {:?}", paper.title, paper.venue, paper.tags);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The inference stage on its own is pure and needs no network:
//!
//! ```
//! use dailypaper::venue::{VenueResolver, VenueTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = VenueResolver::new(VenueTable::default())?;
//! assert_eq!(
//!   resolver.resolve(Some("The Conf (ICPR),2024"), None).as_deref(),
//!   Some("The Conf (ICPR 2024)")
//! );
//! assert_eq!(resolver.resolve(None, Some("This is a preprint.")), None);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`venue`]: Venue inference from bibliographic free text
//! - [`tagger`]: Keyword-driven topic tags
//! - [`enrich`]: Applies both to freshly fetched records
//! - [`retriever`]: arXiv client and the per-category harvest loop
//! - [`store`]: JSON persistence, month grouping and indexes
//! - [`site`]: Static page rendering
//! - [`config`]: TOML configuration
//! - [`paper`]: The [`PaperRecord`](paper::PaperRecord) model

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::{BTreeMap, BTreeSet},
  path::{Path, PathBuf},
  str::FromStr,
};

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use paper::PaperRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod config;
pub mod enrich;
pub mod error;
pub mod paper;
pub mod retriever;
pub mod site;
pub mod store;
pub mod tagger;
pub mod venue;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use dailypaper::prelude::*;
///
/// fn example() -> Result<(), DailyPaperError> {
///   let config = Config::from_path("dailypaper.toml")?;
///   let _enricher = Enricher::from_config(&config)?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    config::Config, enrich::Enricher, error::DailyPaperError, paper::PaperRecord,
    retriever::PaperSource,
  };
}
