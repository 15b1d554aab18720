//! Command line front end for the dailypaper harvester.
//!
//! `dailypaper` fetches the newest arXiv papers for the configured categories, infers where each
//! was published and which topics it covers, appends them to a JSON store and renders a static
//! browsing page. It is meant to run unattended once a day, e.g. from cron or CI.
//!
//! # Usage
//!
//! ```bash
//! # Write the default configuration to ./dailypaper.toml
//! dailypaper init
//!
//! # Harvest, store and render in one go (the scheduled entry point)
//! dailypaper run
//!
//! # Or step by step
//! dailypaper fetch --dry-run
//! dailypaper fetch
//! dailypaper build
//!
//! # Inspect the inference on its own
//! dailypaper venue --comment "12 pages. Accepted at CVPR 2025"
//! dailypaper tag "Vision transformers for robot grasping"
//!
//! # Per-month counts of the store
//! dailypaper stats
//! ```
//!
//! Logging goes to stderr; raise it with `-v` (repeatable) or `RUST_LOG`, and add a daily
//! rolling log file with `--log-dir`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{builder::ArgAction, Args, Parser};
use console::style;
use dailypaper::{
  config::Config,
  error::DailyPaperError,
  paper::PaperRecord,
  store::{MonthSummary, PaperStore},
};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Harvest arXiv papers and bake a static browsing page")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, global = true, help = "Increase logging verbosity")]
  verbose: u8,

  /// Configuration file. Defaults to `./dailypaper.toml`, then the per-user config directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Also write logs to a daily rolling file in this directory
  #[arg(long, global = true)]
  log_dir: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// The config file this invocation refers to.
  fn config_path(&self) -> PathBuf { Config::resolve_path(self.config.as_deref()) }

  /// Loads the configuration.
  ///
  /// An explicitly passed `--config` must exist. Without one, the first existing file in the
  /// lookup order is used, falling back to the bundled defaults.
  fn load_config(&self) -> Result<Config> {
    let path = self.config_path();
    if path.exists() {
      debug!("Using configuration at {}", path.display());
      return Ok(Config::from_path(&path)?);
    }
    if self.config.is_some() {
      return Err(DailyPaperdError::Config(format!(
        "No configuration at {}. Run `dailypaper init --config {}` first.",
        path.display(),
        path.display()
      )));
    }
    info!("No configuration file found, using built-in defaults");
    Ok(Config::bundled()?)
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// With `log_dir`, records are additionally written to `dailypaper.log.<date>` in that directory.
/// The returned guard flushes the file writer when dropped and must be held until exit.
fn setup_logging(verbosity: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  let stderr = fmt::layer()
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true);

  let (file, guard) = match log_dir {
    Some(dir) => {
      let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "dailypaper.log"));
      (Some(fmt::layer().with_writer(writer).with_ansi(false).with_target(true)), Some(guard))
    },
    None => (None, None),
  };

  tracing_subscriber::registry().with(filter).with(stderr).with(file).init();
  guard
}

/// Entry point for the dailypaper CLI application
///
/// # Errors
///
/// Returns a [`DailyPaperdError`] when configuration, harvesting, storage or rendering fails.
/// A category that cannot be fetched is not an error; it is logged and skipped.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let _guard = setup_logging(cli.verbose, cli.log_dir.as_deref());
  let interaction = Terminal::new(cli.accept_defaults);

  let result = match cli.command.clone() {
    Commands::Init(options) => init(&cli, &interaction, options),
    Commands::Fetch(options) => fetch(&cli, &interaction, options).await.map(|_| ()),
    Commands::Build => build(&cli, &interaction),
    Commands::Run => run(&cli, &interaction).await,
    Commands::Venue(options) => venue(&cli, &interaction, options),
    Commands::Tag(options) => tag(&cli, &interaction, options),
    Commands::Stats => stats(&cli, &interaction),
  };

  if let Err(e) = &result {
    eprintln!("{} {}", style(ERROR_PREFIX).red(), style(e).red());
  }
  result
}
