//! Module for the scheduled fetch-and-build cycle.

use super::*;

/// Function for the [`Commands::Run`] in the CLI.
pub async fn run<I: UserInteraction>(cli: &Cli, interaction: &I) -> Result<()> {
  fetch(cli, interaction, FetchOptions::default()).await?;
  build(cli, interaction)
}
