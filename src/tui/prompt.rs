use anyhow::Result;
use crossterm::cursor::{MoveToColumn, MoveToNextLine, MoveToPreviousLine};
use crossterm::style::{style, Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use std::io::Write;
use tabcomplete::completions::{CompleterState, TabCompleter};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

use super::events::{Event, EventHandler};
use super::keys::{KeyMap, PromptAction};

const PROMPT: &str = "> ";

/// How an interactive session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Submitted(String),
    Aborted,
}

/// A single editable line with tab completion underneath it
pub struct Prompt {
    line: String,
    completer: TabCompleter,
    separator: String,
    keys: KeyMap,
}

impl Prompt {
    pub fn new(completer: TabCompleter, separator: impl Into<String>) -> Self {
        Self {
            line: String::new(),
            completer,
            separator: separator.into(),
            keys: KeyMap::default(),
        }
    }

    /// Run until the line is submitted or the user quits
    pub async fn run<W: Write>(
        &mut self,
        out: &mut W,
        events: &mut EventHandler,
    ) -> Result<PromptOutcome> {
        self.draw(out)?;

        while let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = self.keys.action(&key);
                    if let Some(outcome) = self.apply(action) {
                        self.finish(out)?;
                        return Ok(outcome);
                    }
                }
                Event::Completion(message) => {
                    if let Some(joined) = self.completer.update(message)? {
                        self.line = joined;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                }
            }
            self.draw(out)?;
        }

        self.finish(out)?;
        Ok(PromptOutcome::Aborted)
    }

    /// Apply one action; returns the outcome once the session is over
    pub fn apply(&mut self, action: PromptAction) -> Option<PromptOutcome> {
        match action {
            PromptAction::Insert(c) => {
                self.line.push(c);
                self.completer.clear();
            }
            PromptAction::Backspace => {
                self.line.pop();
                self.completer.clear();
            }
            PromptAction::Complete => {
                if self.completer.state() == CompleterState::Active {
                    self.completer.advance();
                } else {
                    self.completer.request(&self.line);
                }
            }
            PromptAction::Next => {
                self.completer.advance();
            }
            PromptAction::Previous => {
                self.completer.retreat();
            }
            PromptAction::Accept => {
                if !self.completer.has_candidates() {
                    return Some(PromptOutcome::Submitted(self.line.clone()));
                }
                match self.completer.select(&self.line) {
                    Ok(joined) => self.line = joined,
                    Err(e) => warn!("Could not select completion: {}", e),
                }
            }
            PromptAction::Dismiss => self.completer.clear(),
            PromptAction::Quit => return Some(PromptOutcome::Aborted),
            PromptAction::Ignore => {}
        }
        None
    }

    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        let view = self.completer.view();

        let below = if let Some(error) = &view.error {
            style(format!("{} ({})", error.cause, error.input)).red().to_string()
        } else {
            view.render(&self.separator, |text, current| {
                if current {
                    style(text).reverse().to_string()
                } else {
                    text.to_string()
                }
            })
        };

        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(PROMPT),
            Print(&self.line),
            MoveToNextLine(1),
            Clear(ClearType::CurrentLine),
            Print(below),
            MoveToPreviousLine(1),
            MoveToColumn(cursor_column(&self.line)),
        )?;
        out.flush()?;
        Ok(())
    }

    fn finish<W: Write>(&self, out: &mut W) -> Result<()> {
        execute!(
            out,
            MoveToNextLine(1),
            Clear(ClearType::CurrentLine),
            MoveToColumn(0)
        )?;
        Ok(())
    }
}

/// Terminal column just past the end of `line`, saturating at `u16::MAX`
fn cursor_column(line: &str) -> u16 {
    u16::try_from(PROMPT.width() + line.width()).unwrap_or(u16::MAX)
}
