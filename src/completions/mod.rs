//! Tab completion for text inputs
//!
//! This module provides:
//! - A [`CompletionSource`] capability with a filesystem implementation
//! - Path expansion and fuzzy ranking used by the filesystem source
//! - A paged candidate navigator with a sliding visible window
//! - The [`TabCompleter`] state machine that ties a source to a navigator
//!   and rejects stale asynchronous results

mod completer;
mod error;
mod file_provider;
mod fuzzy;
mod navigator;
mod path_resolver;
mod view;

pub use completer::*;
pub use error::*;
pub use file_provider::*;
pub use fuzzy::*;
pub use navigator::*;
pub use path_resolver::*;
pub use view::*;

use std::fmt::Debug;

/// Default number of candidates shown at once
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Something that can produce candidates for an input and join a pick back in.
///
/// Sources are synchronous and hold no per-request state; the completer runs
/// `complete` on the blocking pool and owns whatever it returns.
pub trait CompletionSource: Send + Sync + Debug {
    /// Candidates for `input`, already ordered for display
    fn complete(&self, input: &str) -> CompletionResult<Vec<String>>;

    /// The next input value after choosing `selected` while `current` was typed
    fn join(&self, current: &str, selected: &str) -> String;

    /// Name used in log fields
    fn name(&self) -> &str {
        "source"
    }
}
