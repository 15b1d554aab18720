//! Module for summarizing the store.

use super::*;

/// Function for the [`Commands::Stats`] in the CLI.
pub fn stats<I: UserInteraction>(cli: &Cli, interaction: &I) -> Result<()> {
  let config = cli.load_config()?;
  let store = PaperStore::open(&config.output.data_dir)?;
  if store.is_empty() {
    interaction.reply(ResponseContent::Info("No papers stored yet"))?;
    return Ok(());
  }

  let months: Vec<MonthSummary> = store.months_index();
  interaction.reply(ResponseContent::Months(&months))?;

  let published = months.iter().map(|m| m.published_count).sum::<usize>();
  interaction.reply(ResponseContent::Info(&format!(
    "{} papers in total, {} with a venue, {} preprints",
    store.len(),
    published,
    store.len() - published
  )))?;
  Ok(())
}
