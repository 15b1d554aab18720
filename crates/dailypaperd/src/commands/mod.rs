//! One module per subcommand.

use super::*;

pub mod build;
pub mod fetch;
pub mod init;
pub mod run;
pub mod stats;
pub mod tag;
pub mod venue;

pub use build::build;
pub use fetch::{fetch, FetchOptions};
pub use init::{init, InitOptions};
pub use run::run;
pub use stats::stats;
pub use tag::{tag, TagOptions};
pub use venue::{venue, VenueOptions};

/// Available commands for the CLI
#[derive(clap::Subcommand, Clone)]
pub enum Commands {
  /// Write the default configuration file
  Init(InitOptions),

  /// Harvest recent papers, infer venues and topics, and add them to the store
  Fetch(FetchOptions),

  /// Render the static site from the store
  Build,

  /// Fetch, then build; the scheduled daily entry point
  Run,

  /// Infer a venue from a journal reference and/or comment
  Venue(VenueOptions),

  /// Show the topic tags a title and abstract would receive
  Tag(TagOptions),

  /// Show per-month counts of the store
  Stats,
}
