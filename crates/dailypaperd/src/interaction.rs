//! How commands talk to the person (or cron job) running them.

use console::style;
use dialoguer::Confirm;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Branch of a listing
pub static ITEM_PREFIX: &str = "├─";
/// Last branch of a listing
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Continuation line below a branch
pub static CONTINUE_PREFIX: &str = "│  ";

/// Something a command wants to show.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// A completed step
  Success(&'a str),
  /// Neutral progress or hints
  Info(&'a str),
  /// Something worth attention that did not stop the command
  Warning(&'a str),
  /// A listing of papers
  Papers(&'a [PaperRecord]),
  /// The per-month summary of a store
  Months(&'a [MonthSummary]),
}

/// Output and confirmation channel used by every command.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;

  /// Shows a response.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Interaction through the controlling terminal.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
  /// Answer every question with "yes" instead of prompting
  accept_defaults: bool,
}

impl Terminal {
  /// Creates a terminal interaction, non-interactive when `accept_defaults` is set.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults } }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    let prompt = format!("{}{message}", style(PROMPT_PREFIX).yellow());
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Success(message) => println!("{} {message}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Info(message) => println!("{} {message}", style(INFO_PREFIX).cyan()),
      ResponseContent::Warning(message) => println!("{} {message}", style(WARNING_PREFIX).yellow()),
      ResponseContent::Papers(papers) => {
        println!("{} {} papers", style(INFO_PREFIX).cyan(), papers.len());
        for (i, paper) in papers.iter().enumerate() {
          let branch = if i + 1 == papers.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          let continuation = if i + 1 == papers.len() { "   " } else { CONTINUE_PREFIX };
          println!("{} {} {}", style(branch).dim(), style(&paper.id).dim(), style(&paper.title).bold());
          let venue = paper.venue.as_deref().unwrap_or("preprint");
          println!("{}   {}", style(continuation).dim(), style(venue).magenta());
          if !paper.tags.is_empty() {
            let tags: Vec<&str> = paper.tags.iter().map(String::as_str).collect();
            println!("{}   {}", style(continuation).dim(), style(tags.join(", ")).cyan());
          }
        }
      },
      ResponseContent::Months(months) => {
        println!("{:<9} {:>7} {:>10} {:>9}", "month", "papers", "published", "preprint");
        for month in months {
          println!(
            "{:<9} {:>7} {:>10} {:>9}",
            month.month, month.count, month.published_count, month.preprint_count
          );
        }
      },
    }
    Ok(())
  }
}
