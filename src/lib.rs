//! Fuzzy tab completion for text inputs
//!
//! The [`completions`] module holds the completion engine: a filesystem
//! [`CompletionSource`](completions::CompletionSource), the candidate
//! navigator and the [`TabCompleter`](completions::TabCompleter) state
//! machine. [`config`] layers file, environment and caller settings.

pub mod completions;
pub mod config;
pub mod utils;

pub use completions::{
    CompleterState, CompletionError, CompletionResult, CompletionSource, FileSystemSource,
    TabCompleter,
};
pub use config::CompleterConfig;
