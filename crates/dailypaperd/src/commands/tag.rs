//! Module for trying topic tagging by hand.

use dailypaper::tagger::TopicTagger;

use super::*;

/// Options for [`Commands::Tag`].
#[derive(Args, Clone)]
pub struct TagOptions {
  /// Paper title
  pub title: String,

  /// Paper abstract
  #[arg(value_name = "ABSTRACT")]
  pub abstract_text: Option<String>,
}

/// Function for the [`Commands::Tag`] in the CLI.
///
/// Prints one tag per line.
pub fn tag<I: UserInteraction>(cli: &Cli, interaction: &I, options: TagOptions) -> Result<()> {
  let config = cli.load_config()?;
  let tagger = TopicTagger::new(&config.keyword_map());

  let tags = tagger.tag(&options.title, options.abstract_text.as_deref().unwrap_or_default());
  if tags.is_empty() {
    interaction.reply(ResponseContent::Info("No configured topic matches"))?;
  }
  for tag in tags {
    println!("{tag}");
  }
  Ok(())
}
