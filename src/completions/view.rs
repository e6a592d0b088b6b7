//! Read-only snapshot handed to whatever draws the completions

use super::{CandidateNavigator, TabError};

/// A visible candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub text: String,
    pub current: bool,
}

/// The last failed attempt, formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub input: String,
    pub cause: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionView {
    pub entries: Vec<ViewEntry>,
    pub error: Option<ErrorView>,
}

impl CompletionView {
    pub(crate) fn new(navigator: Option<&CandidateNavigator>, error: Option<&TabError>) -> Self {
        let entries = navigator
            .map(|nav| {
                nav.current_page()
                    .into_iter()
                    .map(|entry| ViewEntry {
                        text: entry.text.to_string(),
                        current: entry.current,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let error = error.map(|err| ErrorView {
            input: err.input.clone(),
            cause: err.error.to_string(),
        });

        Self { entries, error }
    }

    pub fn has_candidates(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Join the visible entries with `separator`, styling each through `style`.
    ///
    /// `style` receives the candidate text and whether it is the highlighted one.
    pub fn render<F>(&self, separator: &str, style: F) -> String
    where
        F: Fn(&str, bool) -> String,
    {
        self.entries
            .iter()
            .map(|entry| style(&entry.text, entry.current))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Render without any styling
    pub fn plain(&self, separator: &str) -> String {
        self.render(separator, |text, _| text.to_string())
    }
}
