//! Error types for completion sources and the completer state machine

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("cannot get working directory: {source}")]
    CannotGetWorkingDirectory {
        #[source]
        source: io::Error,
    },

    #[error("could not expand home directory in '{input}': {source}")]
    CouldNotExpandHome {
        input: String,
        #[source]
        source: io::Error,
    },

    #[error("could not expand path '{input}': {source}")]
    CouldNotExpandPath {
        input: String,
        #[source]
        source: io::Error,
    },

    #[error("could not normalize path '{}': {source}", path.display())]
    CouldNotNormalizePath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read directory '{}': {source}", path.display())]
    CouldNotReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("no candidates to select")]
    NoCandidatesToSelect,

    #[error("a completion source must be provided")]
    NoCompletionSourceConfigured,
}

impl CompletionError {
    /// The user input or filesystem path the error is about, if any.
    pub fn subject(&self) -> Option<String> {
        match self {
            Self::CouldNotExpandHome { input, .. } | Self::CouldNotExpandPath { input, .. } => {
                Some(input.clone())
            }
            Self::CouldNotNormalizePath { path, .. }
            | Self::CouldNotReadDirectory { path, .. }
            | Self::NotADirectory { path } => Some(path.display().to_string()),
            Self::CannotGetWorkingDirectory { .. }
            | Self::NoCandidatesToSelect
            | Self::NoCompletionSourceConfigured => None,
        }
    }
}

pub type CompletionResult<T> = Result<T, CompletionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn filesystem_errors_keep_their_cause() {
        let err = CompletionError::CouldNotReadDirectory {
            path: PathBuf::from("/nowhere"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(err.subject().as_deref(), Some("/nowhere"));
        let source = err.source().expect("source should be attached");
        assert_eq!(source.to_string(), "denied");
        assert!(err.to_string().contains("/nowhere"));
    }

    #[test]
    fn state_errors_have_no_subject() {
        assert!(CompletionError::NoCandidatesToSelect.subject().is_none());
        assert!(CompletionError::NoCompletionSourceConfigured.subject().is_none());
    }
}
