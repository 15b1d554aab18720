//! Module for writing a starting configuration.

use dailypaper::config::DEFAULT_CONFIG;

use super::*;

/// Options for [`Commands::Init`].
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Overwrite an existing configuration without asking
  #[arg(long)]
  pub force: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub fn init<I: UserInteraction>(cli: &Cli, interaction: &I, options: InitOptions) -> Result<()> {
  let path = cli.config_path();

  if path.exists()
    && !options.force
    && !interaction.confirm(&format!(
      "A configuration already exists at {}. Overwrite it?",
      path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info("Kept the existing configuration"))?;
    return Ok(());
  }

  if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(&path, DEFAULT_CONFIG)?;
  interaction.reply(ResponseContent::Success(&format!(
    "Wrote configuration to {}",
    path.display()
  )))?;
  Ok(())
}
