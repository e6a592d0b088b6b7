//! Completion state machine
//!
//! A [`TabCompleter`] owns one navigator at a time and drives a
//! [`CompletionSource`] off the calling thread. Results come back as
//! [`CompletionMessage`]s on an unbounded channel and are applied through
//! [`TabCompleter::update`]. Every message carries the id of the completer
//! that produced it, and results also carry the request generation, so a
//! completer ignores anything addressed to another instance or produced by a
//! request that has since been cleared or superseded.

use super::{
    CandidateNavigator, CompletionError, CompletionResult, CompletionSource, CompletionView,
    DEFAULT_PAGE_SIZE,
};
use crate::config::CompleterConfig;
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Identity of one completer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompleterId(Uuid);

impl CompleterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompleterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompleterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse state derived from what the completer currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleterState {
    /// No candidates and no error
    Idle,
    /// A navigator over at least one candidate
    Active,
    /// The last completion attempt failed
    Errored,
}

/// The most recent failed completion attempt
#[derive(Debug, Clone)]
pub struct TabError {
    pub input: String,
    pub error: Arc<CompletionError>,
}

/// Intents from the host and results from the source
#[derive(Debug, Clone)]
pub enum CompletionEvent {
    /// Ask the source for candidates for this input
    Request(String),
    Advance,
    Retreat,
    /// Accept the highlighted candidate; carries the current input
    Select(String),
    Clear,
    Completed {
        generation: u64,
        input: String,
        candidates: Vec<String>,
    },
    Failed {
        generation: u64,
        input: String,
        error: Arc<CompletionError>,
    },
}

impl CompletionEvent {
    fn kind(&self) -> &'static str {
        match self {
            CompletionEvent::Request(_) => "request",
            CompletionEvent::Advance => "advance",
            CompletionEvent::Retreat => "retreat",
            CompletionEvent::Select(_) => "select",
            CompletionEvent::Clear => "clear",
            CompletionEvent::Completed { .. } => "completed",
            CompletionEvent::Failed { .. } => "failed",
        }
    }
}

/// An event addressed to a specific completer
#[derive(Debug, Clone)]
pub struct CompletionMessage {
    pub id: CompleterId,
    pub event: CompletionEvent,
}

/// Builder for [`TabCompleter`]
#[derive(Debug, Default)]
pub struct TabCompleterBuilder {
    source: Option<Arc<dyn CompletionSource>>,
    page_size: Option<usize>,
    id: Option<CompleterId>,
}

impl TabCompleterBuilder {
    pub fn with_source<S: CompletionSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_config(self, config: &CompleterConfig) -> Self {
        self.with_page_size(config.page_size)
    }

    pub fn with_id(mut self, id: CompleterId) -> Self {
        self.id = Some(id);
        self
    }

    /// Build a completer that reports results on `sender`
    pub fn build(self, sender: mpsc::UnboundedSender<CompletionMessage>) -> CompletionResult<TabCompleter> {
        let source = self
            .source
            .ok_or(CompletionError::NoCompletionSourceConfigured)?;

        let page_size = match self.page_size {
            Some(size) if size >= 1 => size,
            _ => DEFAULT_PAGE_SIZE,
        };

        Ok(TabCompleter {
            id: self.id.unwrap_or_default(),
            source,
            page_size,
            navigator: None,
            error: None,
            generation: 0,
            sender,
        })
    }

    /// Build a completer together with the receiving end of its channel
    pub fn build_with_channel(
        self,
    ) -> CompletionResult<(TabCompleter, mpsc::UnboundedReceiver<CompletionMessage>)> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let completer = self.build(sender)?;
        Ok((completer, receiver))
    }
}

pub struct TabCompleter {
    id: CompleterId,
    source: Arc<dyn CompletionSource>,
    page_size: usize,
    navigator: Option<CandidateNavigator>,
    error: Option<TabError>,
    /// Bumped whenever outstanding results become unwanted
    generation: u64,
    sender: mpsc::UnboundedSender<CompletionMessage>,
}

impl fmt::Debug for TabCompleter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabCompleter")
            .field("id", &self.id)
            .field("source", &self.source.name())
            .field("page_size", &self.page_size)
            .field("state", &self.state())
            .field("generation", &self.generation)
            .finish()
    }
}

impl TabCompleter {
    pub fn builder() -> TabCompleterBuilder {
        TabCompleterBuilder::default()
    }

    pub fn id(&self) -> CompleterId {
        self.id
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> CompleterState {
        if self.navigator.is_some() {
            CompleterState::Active
        } else if self.error.is_some() {
            CompleterState::Errored
        } else {
            CompleterState::Idle
        }
    }

    pub fn has_candidates(&self) -> bool {
        self.navigator.is_some()
    }

    pub fn error(&self) -> Option<&TabError> {
        self.error.as_ref()
    }

    pub fn navigator(&self) -> Option<&CandidateNavigator> {
        self.navigator.as_ref()
    }

    /// Snapshot of what should be drawn right now
    pub fn view(&self) -> CompletionView {
        CompletionView::new(self.navigator.as_ref(), self.error.as_ref())
    }

    /// Address `event` to this completer
    pub fn message(&self, event: CompletionEvent) -> CompletionMessage {
        CompletionMessage { id: self.id, event }
    }

    /// Start looking up candidates for `input`.
    ///
    /// The lookup runs on the blocking pool and its result arrives as a
    /// message on the completer's channel. Any result still in flight from an
    /// earlier request is discarded when it arrives. The current candidates
    /// or error stay visible until then.
    pub fn request(&mut self, input: &str) {
        self.generation += 1;

        let id = self.id;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        let input = input.to_string();

        debug!(%id, generation, source = source.name(), input = %input, "Requesting completions");

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let lookup = input.clone();
                    let task_source = Arc::clone(&source);
                    let result =
                        tokio::task::spawn_blocking(move || task_source.complete(&lookup)).await;

                    let event = match result {
                        Ok(result) => outcome(generation, input, result),
                        Err(e) => {
                            warn!(%id, generation, "Completion lookup did not finish: {}", e);
                            return;
                        }
                    };
                    deliver(&sender, CompletionMessage { id, event });
                });
            }
            Err(_) => {
                debug!(%id, generation, "No async runtime, completing inline");
                let result = source.complete(&input);
                let event = outcome(generation, input, result);
                deliver(&sender, CompletionMessage { id, event });
            }
        }
    }

    /// Move the highlight forward; no-op unless candidates are showing
    pub fn advance(&mut self) -> bool {
        self.navigator.as_mut().is_some_and(|nav| nav.move_next())
    }

    /// Move the highlight back; no-op unless candidates are showing
    pub fn retreat(&mut self) -> bool {
        self.navigator.as_mut().is_some_and(|nav| nav.move_prev())
    }

    /// Accept the highlighted candidate and return the new input value.
    ///
    /// The completer is cleared afterwards. Fails with
    /// [`CompletionError::NoCandidatesToSelect`] and leaves everything as it
    /// was when no candidates are showing.
    pub fn select(&mut self, current: &str) -> CompletionResult<String> {
        let navigator = self
            .navigator
            .as_ref()
            .ok_or(CompletionError::NoCandidatesToSelect)?;

        let selected = navigator.select_current();
        let joined = self.source.join(current, selected);
        debug!(id = %self.id, selected, joined = %joined, "Selected completion");

        self.clear();
        Ok(joined)
    }

    /// Drop candidates and error and ignore any result still in flight
    pub fn clear(&mut self) {
        self.navigator = None;
        self.error = None;
        self.generation += 1;
    }

    /// Apply one message.
    ///
    /// Returns the joined input when the message was a successful
    /// [`CompletionEvent::Select`]. Messages addressed to another completer
    /// and results from superseded requests are ignored.
    pub fn update(&mut self, message: CompletionMessage) -> CompletionResult<Option<String>> {
        if message.id != self.id {
            debug!(
                id = %self.id,
                other = %message.id,
                kind = message.event.kind(),
                "Ignoring message for another completer"
            );
            return Ok(None);
        }

        match message.event {
            CompletionEvent::Request(input) => self.request(&input),
            CompletionEvent::Advance => {
                self.advance();
            }
            CompletionEvent::Retreat => {
                self.retreat();
            }
            CompletionEvent::Select(current) => return self.select(&current).map(Some),
            CompletionEvent::Clear => self.clear(),
            CompletionEvent::Completed {
                generation,
                input,
                candidates,
            } => {
                if self.is_stale(generation) {
                    return Ok(None);
                }
                debug!(id = %self.id, input = %input, count = candidates.len(), "Completions ready");
                self.error = None;
                self.navigator = CandidateNavigator::new(candidates, self.page_size);
            }
            CompletionEvent::Failed {
                generation,
                input,
                error,
            } => {
                if self.is_stale(generation) {
                    return Ok(None);
                }
                debug!(id = %self.id, input = %input, "Completion failed: {}", error);
                self.navigator = None;
                self.error = Some(TabError { input, error });
            }
        }

        Ok(None)
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation == self.generation {
            return false;
        }
        debug!(
            id = %self.id,
            generation,
            current = self.generation,
            "Discarding stale completion result"
        );
        true
    }
}

fn outcome(
    generation: u64,
    input: String,
    result: CompletionResult<Vec<String>>,
) -> CompletionEvent {
    match result {
        Ok(candidates) => CompletionEvent::Completed {
            generation,
            input,
            candidates,
        },
        Err(error) => CompletionEvent::Failed {
            generation,
            input,
            error: Arc::new(error),
        },
    }
}

fn deliver(sender: &mpsc::UnboundedSender<CompletionMessage>, message: CompletionMessage) {
    if sender.send(message).is_err() {
        debug!("Completer went away before its result arrived");
    }
}
