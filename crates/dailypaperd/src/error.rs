//! Error types for the `dailypaper` command line tool.

use thiserror::Error;

use super::*;

/// Error type alias used for the CLI.
pub type Result<T> = core::result::Result<T, DailyPaperdError>;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum DailyPaperdError {
  /// Harvesting, storage, rendering or configuration failed in the library.
  #[error(transparent)]
  DailyPaper(#[from] DailyPaperError),

  /// An interactive prompt failed.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// No usable configuration was found.
  #[error("{0}")]
  Config(String),
}
