use crossterm::event::{Event as CrosstermEvent, KeyEvent};
use std::time::Duration;
use tabcomplete::completions::CompletionMessage;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Prompt events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// A completer result or intent
    Completion(CompletionMessage),
}

/// Merges terminal input and completion results into one stream
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    sender: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler and start reading the terminal
    pub fn new(poll_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let input = sender.clone();
        tokio::spawn(async move {
            while !input.is_closed() {
                let polled = tokio::task::spawn_blocking(move || -> std::io::Result<_> {
                    if crossterm::event::poll(poll_interval)? {
                        crossterm::event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                })
                .await;

                match polled {
                    Ok(Ok(Some(event))) => {
                        if let Some(event) = convert_crossterm_event(event) {
                            if input.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(Ok(None)) => {}
                    Ok(Err(e)) => {
                        warn!("Failed to read terminal input: {}", e);
                        break;
                    }
                    Err(e) => {
                        warn!("Terminal reader stopped: {}", e);
                        break;
                    }
                }
            }
            debug!("Terminal reader finished");
        });

        Self { receiver, sender }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// A sender for completer results; each one arrives as [`Event::Completion`]
    pub fn completion_sender(&self) -> mpsc::UnboundedSender<CompletionMessage> {
        let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
        let sender = self.sender.clone();

        tokio::spawn(async move {
            while let Some(message) = completion_rx.recv().await {
                if sender.send(Event::Completion(message)).is_err() {
                    break;
                }
            }
        });

        completion_tx
    }
}

/// Convert crossterm events to prompt events
fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key_event) => Some(Event::Key(key_event)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}
