//! Module for trying venue inference by hand.

use dailypaper::venue::VenueResolver;

use super::*;

/// Options for [`Commands::Venue`].
#[derive(Args, Clone)]
pub struct VenueOptions {
  /// The paper's journal reference, e.g. "Conference on Robot Learning (CoRL), 2024"
  #[arg(long)]
  pub journal_ref: Option<String>,

  /// The author comment, e.g. "12 pages, 5 figures. Accepted at CVPR 2025"
  #[arg(long)]
  pub comment: Option<String>,
}

/// Function for the [`Commands::Venue`] in the CLI.
///
/// Prints the venue, or `preprint` when none is inferred.
pub fn venue<I: UserInteraction>(cli: &Cli, _interaction: &I, options: VenueOptions) -> Result<()> {
  let config = cli.load_config()?;
  let resolver = VenueResolver::new(config.venue_table())?;

  let resolution = resolver.explain(options.journal_ref.as_deref(), options.comment.as_deref());
  info!("Resolved via {:?}", resolution.origin);
  println!("{}", resolution.venue.as_deref().unwrap_or("preprint"));
  Ok(())
}
