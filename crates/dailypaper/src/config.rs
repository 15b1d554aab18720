//! TOML configuration for harvesting, tagging and output locations.
//!
//! Every section is optional; missing sections fall back to defaults so that a config
//! containing only `[categories]` is still usable.
//!
//! ```toml
//! [sources.arxiv]
//! enabled     = true
//! categories  = ["cs.CV", "cs.CL"]
//! max_results = 100
//! days_back   = 1
//!
//! [categories."Computer Vision"]
//! keywords = ["vision", "image"]
//!
//! [output]
//! data_dir = "data"
//! site_dir = "docs"
//! ```

use super::*;
use crate::{tagger::CategoryKeywordMap, venue::VenueTable};

/// The configuration written by `dailypaper init`.
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/dailypaper.toml");

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dailypaper.toml";

/// Default arXiv Atom endpoint.
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
  /// Where papers come from
  #[serde(default)]
  pub sources:    Sources,
  /// Topic name to keyword list
  #[serde(default)]
  pub categories: BTreeMap<String, CategoryConfig>,
  /// Overrides for the built-in venue lists
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub venues:     Option<VenueLists>,
  /// Output locations
  #[serde(default)]
  pub output:     OutputConfig,
}

/// The `[sources]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sources {
  /// arXiv listing queries
  #[serde(default)]
  pub arxiv: ArxivSource,
}

/// Settings for the arXiv Atom API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArxivSource {
  /// Set to `false` to skip arXiv entirely
  #[serde(default = "default_true")]
  pub enabled:     bool,
  /// arXiv subject categories to query, e.g. `cs.CV`
  #[serde(default)]
  pub categories:  Vec<String>,
  /// Upper bound on entries requested per category
  #[serde(default = "default_max_results")]
  pub max_results: usize,
  /// How far back, in days, an entry's update date may lie
  #[serde(default = "default_days_back")]
  pub days_back:   u32,
  /// Query endpoint, overridable for mirrors and tests
  #[serde(default = "default_base_url")]
  pub base_url:    String,
}

/// One `[categories."<name>"]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
  /// Case-insensitive substrings that earn the tag
  #[serde(default)]
  pub keywords: Vec<String>,
}

/// Replacement acronym and journal lists for venue inference.
///
/// Either list may be omitted to keep the built-in one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueLists {
  /// Conference acronyms, in priority order
  #[serde(default)]
  pub conferences: Option<Vec<String>>,
  /// Journal keywords
  #[serde(default)]
  pub journals:    Option<Vec<String>>,
}

/// The `[output]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
  /// Where `papers.json` and the month files live
  #[serde(default = "default_data_dir")]
  pub data_dir: PathBuf,
  /// Where the rendered page is written
  #[serde(default = "default_site_dir")]
  pub site_dir: PathBuf,
  /// Page heading
  #[serde(default = "default_title")]
  pub title:    String,
}

fn default_true() -> bool { true }

fn default_max_results() -> usize { 100 }

fn default_days_back() -> u32 { 1 }

fn default_base_url() -> String { ARXIV_API_URL.to_string() }

fn default_data_dir() -> PathBuf { PathBuf::from("data") }

fn default_site_dir() -> PathBuf { PathBuf::from("docs") }

fn default_title() -> String { "Daily Papers".to_string() }

impl Default for ArxivSource {
  fn default() -> Self {
    Self {
      enabled:     true,
      categories:  Vec::new(),
      max_results: default_max_results(),
      days_back:   default_days_back(),
      base_url:    default_base_url(),
    }
  }
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self { data_dir: default_data_dir(), site_dir: default_site_dir(), title: default_title() }
  }
}

impl FromStr for Config {
  type Err = DailyPaperError;

  fn from_str(s: &str) -> Result<Self> {
    let config: Config = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
  }
}

impl Config {
  /// Reads and validates a config file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    std::fs::read_to_string(path)?.parse()
  }

  /// The configuration shipped with the crate.
  pub fn bundled() -> Result<Self> { DEFAULT_CONFIG.parse() }

  /// Picks the config file to use.
  ///
  /// An explicit path always wins. Otherwise `./dailypaper.toml` is used when it exists, then
  /// the per-user config directory (e.g. `~/.config/dailypaper/config.toml` on Linux). When
  /// nothing exists yet the working-directory location is returned so that `init` writes there.
  pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
      return path.to_path_buf();
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
      return local;
    }
    match Self::user_path() {
      Some(user) if user.exists() => user,
      _ => local,
    }
  }

  /// The per-user config location, if the platform has one.
  pub fn user_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dailypaper").join("config.toml"))
  }

  /// Serializes back to TOML.
  pub fn to_toml_string(&self) -> Result<String> { Ok(toml::to_string_pretty(self)?) }

  /// Rejects settings that would make a run meaningless.
  pub fn validate(&self) -> Result<()> {
    let arxiv = &self.sources.arxiv;
    if arxiv.max_results == 0 {
      return Err(DailyPaperError::Config("sources.arxiv.max_results must be positive".into()));
    }
    if arxiv.enabled && arxiv.categories.is_empty() {
      return Err(DailyPaperError::Config(
        "sources.arxiv is enabled but lists no categories".into(),
      ));
    }
    if url::Url::parse(&arxiv.base_url).is_err() {
      return Err(DailyPaperError::Config(format!(
        "sources.arxiv.base_url is not a valid URL: {}",
        arxiv.base_url
      )));
    }
    Ok(())
  }

  /// Flattens `[categories]` into the map consumed by the tagger.
  pub fn keyword_map(&self) -> CategoryKeywordMap {
    self.categories.iter().map(|(name, category)| (name.clone(), category.keywords.clone())).collect()
  }

  /// The venue lists to resolve against, built-in unless overridden.
  pub fn venue_table(&self) -> VenueTable {
    let mut table = VenueTable::default();
    if let Some(VenueLists { conferences, journals }) = &self.venues {
      if let Some(conferences) = conferences {
        table = table.with_acronyms(conferences.iter().cloned());
      }
      if let Some(journals) = journals {
        table = table.with_journals(journals.iter().cloned());
      }
    }
    table
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bundled_config_is_valid() {
    let config = Config::bundled().unwrap();
    assert!(config.sources.arxiv.enabled);
    assert!(!config.sources.arxiv.categories.is_empty());
    assert!(!config.categories.is_empty());
    assert_eq!(config.sources.arxiv.base_url, ARXIV_API_URL);
  }

  #[test]
  fn test_missing_sections_take_defaults() {
    let config: Config = r#"
      [sources.arxiv]
      categories = ["cs.RO"]
    "#
    .parse()
    .unwrap();

    assert_eq!(config.sources.arxiv.max_results, 100);
    assert_eq!(config.sources.arxiv.days_back, 1);
    assert_eq!(config.output.data_dir, PathBuf::from("data"));
    assert_eq!(config.output.site_dir, PathBuf::from("docs"));
    assert!(config.keyword_map().is_empty());
  }

  #[test]
  fn test_validation_failures() {
    let err = "[sources.arxiv]\ncategories = []\n".parse::<Config>().unwrap_err();
    assert!(matches!(err, DailyPaperError::Config(_)));

    let err = "[sources.arxiv]\ncategories = [\"cs.CV\"]\nmax_results = 0\n"
      .parse::<Config>()
      .unwrap_err();
    assert!(matches!(err, DailyPaperError::Config(_)));

    // A disabled source does not need categories.
    assert!("[sources.arxiv]\nenabled = false\n".parse::<Config>().is_ok());
  }

  #[test]
  fn test_keyword_map_and_venue_override() {
    let config: Config = r#"
      [sources.arxiv]
      enabled = false

      [categories."Robotics"]
      keywords = ["robot", "manipulation"]

      [venues]
      conferences = ["FOO"]
    "#
    .parse()
    .unwrap();

    let map = config.keyword_map();
    assert_eq!(map["Robotics"], vec!["robot".to_string(), "manipulation".to_string()]);

    let table = config.venue_table();
    assert_eq!(table.canonical_acronym("foo"), Some("FOO"));
    assert_eq!(table.canonical_acronym("CVPR"), None);
    // journals were not overridden
    assert!(table.journals().iter().any(|j| j == "Nature"));
  }

  #[test]
  fn test_round_trip_through_toml() {
    let config = Config::bundled().unwrap();
    let text = config.to_toml_string().unwrap();
    assert_eq!(text.parse::<Config>().unwrap(), config);
  }
}
