use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabcomplete::completions::{FileSystemSource, TabCompleter, TabCompleterBuilder};
use tabcomplete::config::CompleterConfig;
use tracing::{debug, info};

use super::complete::CompleteCommand;
use crate::tui::{self, PromptOutcome};

/// tabcomplete - fuzzy tab completion for filesystem paths
#[derive(Parser)]
#[command(
    name = "tabcomplete",
    version,
    about = "Fuzzy tab completion for filesystem paths",
    long_about = r#"Completes the last segment of a path against the entries of its directory,
ranked by fuzzy match quality.

Examples:
  tabcomplete                        # Start the interactive prompt
  tabcomplete complete src/ma        # Print the candidates for src/ma
  tabcomplete complete -s 0 ~/Doc    # Print the line after picking the best match
  tabcomplete --cwd /tmp --hidden    # Complete relative to /tmp, dot-files included"#
)]
pub struct Cli {
    /// Current working directory
    #[arg(short = 'c', long = "cwd", global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Number of candidates visible at once
    #[arg(short = 'p', long = "page-size", global = true)]
    pub page_size: Option<usize>,

    /// Include dot-files
    #[arg(short = 'H', long = "hidden", global = true)]
    pub hidden: bool,

    /// Placed between candidates in the interactive prompt
    #[arg(long = "separator", global = true)]
    pub separator: Option<String>,

    /// Configuration file to load instead of the default locations
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Complete a single input non-interactively
    Complete(CompleteCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        // Change working directory if specified
        if let Some(cwd) = &self.cwd {
            std::env::set_current_dir(cwd).map_err(|e| {
                anyhow::anyhow!("Failed to change directory to {}: {}", cwd.display(), e)
            })?;
            info!("Changed working directory to: {}", cwd.display());
        }

        let config = CompleterConfig::init(self.config.as_deref())
            .await?
            .with_overrides(self.page_size, self.separator.clone(), self.hidden);
        debug!(?config, "Configuration initialized");

        let builder = completer_builder(&config);

        match &self.command {
            Some(Commands::Complete(cmd)) => cmd.execute(builder).await,
            None => self.start_interactive_mode(builder, &config).await,
        }
    }

    async fn start_interactive_mode(
        &self,
        builder: TabCompleterBuilder,
        config: &CompleterConfig,
    ) -> Result<()> {
        info!("Starting interactive mode");

        match tui::run(builder, &config.separator).await? {
            PromptOutcome::Submitted(line) => println!("{}", line),
            PromptOutcome::Aborted => debug!("Prompt aborted"),
        }

        Ok(())
    }
}

fn completer_builder(config: &CompleterConfig) -> TabCompleterBuilder {
    let source = FileSystemSource::new().with_hidden_files(config.include_hidden);
    TabCompleter::builder().with_source(source).with_config(config)
}
