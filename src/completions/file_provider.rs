//! File system completion source for paths and filenames

use super::{
    path_resolver::split_last_segment, CompletionError, CompletionResult, CompletionSource,
    FuzzyRanker, PathResolver,
};
use crate::utils::fs::{list_directory, EntryInfo, ListConfig};
use std::path::{is_separator, PathBuf, MAIN_SEPARATOR};
use tracing::debug;

/// Completes filesystem paths one segment at a time.
///
/// Directory candidates carry a trailing separator so that joining one in
/// and completing again lists its contents straight away.
#[derive(Debug, Clone, Default)]
pub struct FileSystemSource {
    resolver: PathResolver,
    show_hidden: bool,
}

impl FileSystemSource {
    /// Create a new filesystem source
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable dot-prefixed entries
    pub fn with_hidden_files(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// Set working directory used for relative and empty input
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resolver = self.resolver.with_working_directory(dir);
        self
    }

    /// Set the directory `~` expands to
    pub fn with_home_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resolver = self.resolver.with_home_directory(dir);
        self
    }

    fn display_name(entry: &EntryInfo) -> String {
        if entry.is_dir {
            format!("{}{}", entry.name, MAIN_SEPARATOR)
        } else {
            entry.name.clone()
        }
    }

    /// The literal part of `current` that a selection is appended to.
    ///
    /// Whatever notation the user typed (`~`, `.`, `..`, relative) is kept;
    /// only the trailing partial segment is dropped.
    fn literal_prefix<'a>(&self, current: &'a str) -> &'a str {
        let resolved = match self.resolver.resolve(current) {
            Ok(resolved) if resolved.is_listing() => Some(current),
            Ok(resolved) => current.strip_suffix(resolved.partial.as_str()),
            Err(e) => {
                debug!("Joining '{}' lexically: {}", current, e);
                None
            }
        };

        resolved.unwrap_or_else(|| {
            split_last_segment(current)
                .map(|(prefix, _)| prefix)
                .unwrap_or("")
        })
    }
}

impl CompletionSource for FileSystemSource {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn complete(&self, input: &str) -> CompletionResult<Vec<String>> {
        let resolved = self.resolver.resolve(input)?;

        debug!(
            "File completion - input: '{}', dir: {}, partial: '{}'",
            input,
            resolved.directory.display(),
            resolved.partial
        );

        let config = ListConfig {
            include_hidden: self.show_hidden,
            ..Default::default()
        };

        let entries = list_directory(&resolved.directory, &config).map_err(|source| {
            CompletionError::CouldNotReadDirectory {
                path: resolved.directory.clone(),
                source,
            }
        })?;

        let candidates: Vec<String> = entries.iter().map(Self::display_name).collect();

        Ok(FuzzyRanker::new().rank(&resolved.partial, candidates))
    }

    fn join(&self, current: &str, selected: &str) -> String {
        if current.is_empty() {
            return selected.to_string();
        }

        let prefix = self.literal_prefix(current);

        if prefix.is_empty() {
            selected.to_string()
        } else if prefix.ends_with(is_separator) {
            format!("{}{}", prefix, selected)
        } else {
            format!("{}{}{}", prefix, MAIN_SEPARATOR, selected)
        }
    }
}
