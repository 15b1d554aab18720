//! Module for rendering the static site.

use dailypaper::site::SiteBuilder;

use super::*;

/// Function for the [`Commands::Build`] in the CLI.
pub fn build<I: UserInteraction>(cli: &Cli, interaction: &I) -> Result<()> {
  let config = cli.load_config()?;
  let store = PaperStore::open(&config.output.data_dir)?;
  if store.is_empty() {
    interaction.reply(ResponseContent::Warning("The store is empty; building an empty page"))?;
  }

  let index = SiteBuilder::from_config(&config.output)?.build(&store, Utc::now())?;
  interaction.reply(ResponseContent::Success(&format!(
    "Built page for {} papers at {}",
    store.len(),
    index.display()
  )))?;
  Ok(())
}
