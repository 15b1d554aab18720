//! Static site generation.
//!
//! [`SiteBuilder`] renders the stored papers into a self-contained directory that can be
//! served as-is, e.g. from GitHub Pages:
//!
//! ```text
//! docs/
//! ├── index.html              cards for every paper plus the embedded JSON
//! ├── css/style.css
//! ├── js/main.js              filter, sort, search and export in the browser
//! └── data/
//!     ├── papers.json
//!     └── months_index.json
//! ```

use std::fs;

use minijinja::{Environment, Value};

use super::*;
use crate::{config::OutputConfig, store::PaperStore};

/// Page template.
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Stylesheet copied to `css/style.css`.
const STYLE_CSS: &str = include_str!("../../templates/style.css");

/// Script copied to `js/main.js`.
const MAIN_JS: &str = include_str!("../../templates/main.js");

/// Authors listed on a card before "et al.".
pub const MAX_CARD_AUTHORS: usize = 5;

/// Venues with a dedicated badge style, checked in order against the venue label.
const VENUE_STYLES: &[(&str, &str)] = &[
  ("NeurIPS", "venue-neurips"),
  ("CVPR", "venue-cvpr"),
  ("ICCV", "venue-iccv"),
  ("ECCV", "venue-eccv"),
  ("ICML", "venue-icml"),
  ("ICLR", "venue-iclr"),
  ("ACL", "venue-acl"),
  ("EMNLP", "venue-emnlp"),
  ("AAAI", "venue-aaai"),
  ("IJCAI", "venue-ijcai"),
];

lazy_static! {
  /// `Code: <url>`, `code is available at <url>`
  static ref CODE_LINK: Regex =
    Regex::new(r"[Cc]ode[:\s]+(?:(?:is\s+)?(?:publicly\s+)?available\s+at\s+)?(https?://\S+)").unwrap();
  /// `Project page: <url>`
  static ref PROJECT_LINK: Regex =
    Regex::new(r"[Pp]roject[:\s]+(?:page[:\s]+)?(?:(?:is\s+)?available\s+at\s+)?(https?://\S+)").unwrap();
  /// Any GitHub repository URL
  static ref GITHUB_LINK: Regex =
    Regex::new(r"https?://(?:www\.)?github\.com/[\w\-]+/[\w\-.]+").unwrap();
}

/// Readable name of an arXiv subject category, or the code itself when unknown.
pub fn category_display_name(category: &str) -> &str {
  match category {
    "cs.AI" => "Artificial Intelligence",
    "cs.CV" => "Computer Vision",
    "cs.CL" => "Computational Linguistics (NLP)",
    "cs.LG" => "Machine Learning",
    "cs.IR" => "Information Retrieval",
    "cs.RO" => "Robotics",
    "cs.NE" => "Neural and Evolutionary Computing",
    "cs.CR" => "Cryptography and Security",
    "cs.HC" => "Human-Computer Interaction",
    "cs.MM" => "Multimedia",
    "stat.ML" => "Machine Learning (Statistics)",
    other => other,
  }
}

/// Badge CSS class and label for a venue.
///
/// ```
/// use dailypaper::site::venue_badge;
///
/// assert_eq!(venue_badge(Some("CVPR 2025")), ("venue-cvpr", "CVPR 2025".to_string()));
/// assert_eq!(venue_badge(Some("Nature")), ("venue-other", "Nature".to_string()));
/// assert_eq!(venue_badge(None), ("preprint", "Preprint".to_string()));
/// ```
pub fn venue_badge(venue: Option<&str>) -> (&'static str, String) {
  let Some(venue) = venue else {
    return ("preprint", "Preprint".to_string());
  };
  let class = VENUE_STYLES
    .iter()
    .find(|(name, _)| venue.contains(name))
    .map_or("venue-other", |(_, class)| *class);
  (class, venue.to_string())
}

/// Links to code and a project page mentioned in an abstract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeLinks {
  /// Source code, from "Code: <url>" or the first GitHub repository URL
  pub code:    Option<String>,
  /// Project page, from "Project page: <url>"
  pub project: Option<String>,
}

/// Scans an abstract for code and project links.
pub fn extract_code_links(abstract_text: &str) -> CodeLinks {
  let capture = |pattern: &Regex| {
    pattern.captures(abstract_text).and_then(|caps| caps.get(1)).map(|m| trim_link(m.as_str()))
  };
  let code = capture(&CODE_LINK)
    .or_else(|| GITHUB_LINK.find(abstract_text).map(|m| trim_link(m.as_str())));
  CodeLinks { code, project: capture(&PROJECT_LINK) }
}

/// Drops sentence punctuation glued to the end of a URL.
fn trim_link(url: &str) -> String { url.trim_end_matches(['.', ',', ';', ')']).to_string() }

/// Everything a paper card in the template needs.
#[derive(Debug, Serialize)]
struct PaperCard<'a> {
  /// Record id, used by the export script
  id:            &'a str,
  /// Title
  title:         &'a str,
  /// Abstract
  abstract_text: &'a str,
  /// Abstract page link
  arxiv_url:     &'a str,
  /// PDF link
  pdf_url:       &'a str,
  /// `YYYY-MM-DD`
  published:     String,
  /// Readable primary category
  category_name: &'a str,
  /// Truncated author list
  authors:       String,
  /// Topic tags
  tags:          Vec<&'a str>,
  /// `published` or `preprint`, for the status filter
  status:        &'static str,
  /// Badge CSS class
  venue_class:   &'static str,
  /// Badge text
  venue_label:   String,
  /// Source code link
  code_url:      Option<String>,
  /// Project page link
  project_url:   Option<String>,
}

impl<'a> PaperCard<'a> {
  /// Derives the card for one record.
  fn new(paper: &'a PaperRecord) -> Self {
    let (venue_class, venue_label) = venue_badge(paper.venue.as_deref());
    let links = extract_code_links(&paper.abstract_text);
    Self {
      id: &paper.id,
      title: &paper.title,
      abstract_text: &paper.abstract_text,
      arxiv_url: &paper.arxiv_url,
      pdf_url: &paper.pdf_url,
      published: paper.published.format("%Y-%m-%d").to_string(),
      category_name: category_display_name(&paper.primary_category),
      authors: paper.format_authors(MAX_CARD_AUTHORS),
      tags: paper.tags.iter().map(String::as_str).collect(),
      status: if paper.is_published() { "published" } else { "preprint" },
      venue_class,
      venue_label,
      code_url: links.code,
      project_url: links.project,
    }
  }
}

/// Renders the browsing page and its assets.
#[derive(Debug)]
pub struct SiteBuilder {
  /// Template environment with the page template loaded
  env:     Environment<'static>,
  /// Where the site is written
  out_dir: PathBuf,
  /// Page heading
  title:   String,
}

impl SiteBuilder {
  /// Prepares a builder writing into `out_dir`.
  pub fn new(out_dir: impl Into<PathBuf>, title: impl Into<String>) -> Result<Self> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    Ok(Self { env, out_dir: out_dir.into(), title: title.into() })
  }

  /// Prepares a builder for the `[output]` section.
  pub fn from_config(output: &OutputConfig) -> Result<Self> {
    Self::new(&output.site_dir, &output.title)
  }

  /// The output directory.
  pub fn out_dir(&self) -> &Path { &self.out_dir }

  /// Renders `index.html` for `papers` without touching the file system.
  pub fn render_index(&self, papers: &[PaperRecord], generated_at: DateTime<Utc>) -> Result<String> {
    let published = papers.iter().filter(|paper| paper.is_published()).count();
    let tags: BTreeSet<&str> =
      papers.iter().flat_map(|paper| paper.tags.iter().map(String::as_str)).collect();
    let cards: Vec<PaperCard> = papers.iter().map(PaperCard::new).collect();

    let template = self.env.get_template("index.html")?;
    let html = template.render(minijinja::context! {
      title => &self.title,
      generated_at => generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
      total => papers.len(),
      published => published,
      preprint => papers.len() - published,
      tags => tags,
      papers => cards,
      papers_json => embedded_json(papers)?,
    })?;
    Ok(html)
  }

  /// Writes the page, assets and data copies for the papers in `store`.
  ///
  /// Returns the path of the written `index.html`.
  pub fn build(&self, store: &PaperStore, generated_at: DateTime<Utc>) -> Result<PathBuf> {
    let html = self.render_index(store.papers(), generated_at)?;

    for dir in ["css", "js", "data"] {
      fs::create_dir_all(self.out_dir.join(dir))?;
    }
    let index = self.out_dir.join("index.html");
    fs::write(&index, html)?;
    fs::write(self.out_dir.join("css").join("style.css"), STYLE_CSS)?;
    fs::write(self.out_dir.join("js").join("main.js"), MAIN_JS)?;
    fs::write(
      self.out_dir.join("data").join("papers.json"),
      serde_json::to_string_pretty(store.papers())?,
    )?;
    fs::write(
      self.out_dir.join("data").join("months_index.json"),
      serde_json::to_string_pretty(&store.months_index())?,
    )?;

    info!("Built site for {} papers at {}", store.len(), index.display());
    Ok(index)
  }
}

/// Serializes records for a `<script type="application/json">` block.
///
/// `</` is escaped so that no string inside the data can close the script element.
fn embedded_json(papers: &[PaperRecord]) -> Result<Value> {
  let json = serde_json::to_string(papers)?.replace("</", "<\\/");
  Ok(Value::from_safe_string(json))
}
