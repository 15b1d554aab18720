//! Error types for the dailypaper library.
//!
//! Only the collaborators around the inference core can fail: the network client, the
//! JSON store, the site renderer and configuration loading. Venue resolution and tagging
//! never return errors; an unrecognised input simply yields no venue or no tags.
//!
//! # Examples
//!
//! ```no_run
//! use dailypaper::{config::Config, error::DailyPaperError};
//!
//! match Config::from_path("missing.toml") {
//!   Err(DailyPaperError::Io(e)) => println!("Could not read config: {e}"),
//!   Err(DailyPaperError::TomlDe(e)) => println!("Config is not valid TOML: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(_) => println!("Loaded!"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`dailypaper`](crate) crate.
pub type Result<T> = core::result::Result<T, DailyPaperError>;

/// Errors that can occur while harvesting, storing or rendering papers.
#[derive(Error, Debug)]
pub enum DailyPaperError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The arXiv endpoint is unreachable
  /// - The request times out
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The upstream API answered, but not with something usable.
  ///
  /// Carries the HTTP status or a description of the malformed payload.
  #[error("API error: {0}")]
  ApiError(String),

  /// Reading the Atom feed failed at the XML level.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// An endpoint could not be turned into a request URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// A timestamp in a feed or store could not be parsed.
  #[error("Invalid date: {0}")]
  InvalidDate(String),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - The configuration file is missing
  /// - The data or site directory cannot be created
  /// - Permission errors occur
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Stored JSON could not be read or written.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The configuration file is not valid TOML or does not match the schema.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// Serializing a configuration back to TOML failed.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// Rendering the static page failed.
  #[error(transparent)]
  Template(#[from] minijinja::Error),

  /// A pattern supplied through configuration is not a valid regular expression.
  #[error(transparent)]
  Regex(#[from] regex::Error),

  /// The configuration parsed but is semantically invalid.
  #[error("{0}")]
  Config(String),
}
