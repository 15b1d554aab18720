//! Module for harvesting new papers into the store.

use std::time::Duration;

use dailypaper::{
  enrich::Enricher,
  retriever::{ArxivClient, Harvester},
  store::MergeReport,
};

use super::*;

/// Pause between category requests to stay within the arXiv API terms.
const REQUEST_DELAY: Duration = Duration::from_secs(3);

/// Options for [`Commands::Fetch`].
#[derive(Args, Clone, Default)]
pub struct FetchOptions {
  /// Print what would be added without writing anything
  #[arg(long)]
  pub dry_run: bool,
}

/// Function for the [`Commands::Fetch`] in the CLI.
///
/// Returns the merge outcome, or `None` for a dry run.
pub async fn fetch<I: UserInteraction>(
  cli: &Cli,
  interaction: &I,
  options: FetchOptions,
) -> Result<Option<MergeReport>> {
  let config = cli.load_config()?;
  let settings = &config.sources.arxiv;
  let enricher = Enricher::from_config(&config)?;
  let client = ArxivClient::new(&settings.base_url)?;

  interaction.reply(ResponseContent::Info(&format!(
    "Fetching {} categories from arXiv...",
    settings.categories.len()
  )))?;
  let now = Utc::now();
  let papers = Harvester::new(&client, &enricher).with_delay(REQUEST_DELAY).harvest(settings, now).await;

  if papers.is_empty() {
    interaction.reply(ResponseContent::Warning("No new papers were fetched"))?;
  }

  if options.dry_run {
    interaction.reply(ResponseContent::Papers(&papers))?;
    return Ok(None);
  }

  let mut store = PaperStore::open(&config.output.data_dir)?;
  let report = store.merge(papers.iter().cloned());
  store.save()?;
  store.write_daily_snapshot(&papers, now.date_naive())?;

  interaction.reply(ResponseContent::Success(&format!(
    "Added {} new papers, {} stored in {}",
    report.added,
    report.total,
    config.output.data_dir.display()
  )))?;
  Ok(Some(report))
}
