//! Keyword-driven topic tags.
//!
//! Each configured category owns a list of keywords. A paper receives the category's name as a
//! tag when any keyword occurs, case-insensitively, anywhere in its title or abstract. There is
//! no catch-all tag: papers matching nothing simply have an empty tag set.
//!
//! # Examples
//!
//! ```
//! use dailypaper::tagger::{CategoryKeywordMap, TopicTagger};
//!
//! let map = CategoryKeywordMap::from([
//!   ("Machine Learning".to_string(), vec!["transformer".to_string()]),
//!   ("Computer Vision".to_string(), vec!["vision".to_string()]),
//!   ("Robotics".to_string(), vec!["robot".to_string()]),
//! ]);
//! let tagger = TopicTagger::new(&map);
//!
//! let tags = tagger.tag("A study of Transformers for vision", "...");
//! assert_eq!(tags.len(), 2);
//! assert!(tags.contains("Machine Learning"));
//! assert!(tags.contains("Computer Vision"));
//! ```

use super::*;

/// Category name to keyword list, as read from `[categories]` in the config.
pub type CategoryKeywordMap = BTreeMap<String, Vec<String>>;

/// Assigns topic tags from a fixed keyword map.
///
/// Keywords are lowercased once at construction, so tagging only lowercases the paper text.
#[derive(Debug, Clone, Default)]
pub struct TopicTagger {
  /// Category name with its lowercased, non-empty keywords
  categories: Vec<(String, Vec<String>)>,
}

impl TopicTagger {
  /// Prepares a tagger for `keyword_map`.
  ///
  /// Keywords are matched as written apart from case, so surrounding spaces act as word
  /// boundaries. Empty keywords are ignored, and a category left without keywords never matches.
  pub fn new(keyword_map: &CategoryKeywordMap) -> Self {
    let categories = keyword_map
      .iter()
      .map(|(name, keywords)| {
        let keywords = keywords
          .iter()
          .map(|keyword| keyword.to_lowercase())
          .filter(|keyword| !keyword.is_empty())
          .collect();
        (name.clone(), keywords)
      })
      .collect();
    Self { categories }
  }

  /// Number of configured categories.
  pub fn len(&self) -> usize { self.categories.len() }

  /// Whether no categories are configured.
  pub fn is_empty(&self) -> bool { self.categories.is_empty() }

  /// The set of categories whose keywords occur in `title` or `abstract_text`.
  pub fn tag(&self, title: &str, abstract_text: &str) -> BTreeSet<String> {
    let text = format!("{title} {abstract_text}").to_lowercase();
    self
      .categories
      .iter()
      .filter(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword.as_str())))
      .map(|(name, _)| name.clone())
      .collect()
  }
}

/// One-shot form of [`TopicTagger::tag`].
pub fn tag(title: &str, abstract_text: &str, keyword_map: &CategoryKeywordMap) -> BTreeSet<String> {
  TopicTagger::new(keyword_map).tag(title, abstract_text)
}
