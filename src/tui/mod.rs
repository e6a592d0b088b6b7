//! Interactive completion prompt drawn inline with crossterm

mod events;
mod keys;
mod prompt;

pub use prompt::PromptOutcome;

use events::EventHandler;
use keys::KeyMap;
use prompt::Prompt;

use anyhow::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;
use std::time::Duration;
use tabcomplete::completions::TabCompleterBuilder;
use tracing::{debug, warn};

/// Keeps the terminal in raw mode until dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Run the prompt until the line is submitted or the user quits
pub async fn run(builder: TabCompleterBuilder, separator: &str) -> Result<PromptOutcome> {
    let mut events = EventHandler::new(Duration::from_millis(100));
    let completer = builder.build(events.completion_sender())?;
    debug!(id = %completer.id(), "Starting prompt");

    let mut prompt = Prompt::new(completer, separator);
    let mut stdout = io::stdout();

    println!("{}", KeyMap::default().help_text());

    let _raw = RawModeGuard::enable()?;
    prompt.run(&mut stdout, &mut events).await
}
