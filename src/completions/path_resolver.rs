//! Path expansion and normalization for filesystem completion
//!
//! Input typed by the user is turned into an absolute path (home and working
//! directory expansion), then split into an existing directory to list and
//! the partial trailing segment still being typed. Nothing is cached: the
//! filesystem is consulted on every call.

use super::{CompletionError, CompletionResult};
use std::{
    env, fs, io,
    path::{is_separator, Path, PathBuf},
};

/// An existing directory plus the partial segment to complete inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub directory: PathBuf,
    /// Empty when the input already names a directory
    pub partial: String,
}

impl ResolvedPath {
    /// Whether the whole directory should be listed without filtering
    pub fn is_listing(&self) -> bool {
        self.partial.is_empty()
    }
}

/// Resolves user input against a working directory and a home directory.
///
/// Both default to the process's current directory and the platform home
/// directory; either can be pinned for embedding or tests.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    working_directory: Option<PathBuf>,
    home_directory: Option<PathBuf>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative and empty input against `dir` instead of the process cwd
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Expand `~` to `dir` instead of the platform home directory
    pub fn with_home_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_directory = Some(dir.into());
        self
    }

    fn working_directory(&self) -> io::Result<PathBuf> {
        match &self.working_directory {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir(),
        }
    }

    fn home_directory(&self) -> Option<PathBuf> {
        self.home_directory.clone().or_else(dirs::home_dir)
    }

    /// Expand `input` into an absolute path.
    ///
    /// Empty input is the working directory. A leading `~` is the home
    /// directory. Anything else relative is joined onto the working
    /// directory. `.` and `..` components are kept as written.
    pub fn expand(&self, input: &str) -> CompletionResult<PathBuf> {
        if input.is_empty() {
            return self
                .working_directory()
                .map_err(|source| CompletionError::CannotGetWorkingDirectory { source });
        }

        let path = match input.strip_prefix('~') {
            Some(rest) => self.expand_home(input, rest)?,
            None => PathBuf::from(input),
        };

        if path.is_absolute() {
            return Ok(path);
        }

        let cwd = self
            .working_directory()
            .map_err(|source| CompletionError::CouldNotExpandPath {
                input: input.to_string(),
                source,
            })?;

        Ok(cwd.join(path))
    }

    fn expand_home(&self, input: &str, rest: &str) -> CompletionResult<PathBuf> {
        if !rest.is_empty() && !rest.starts_with(is_separator) {
            return Err(CompletionError::CouldNotExpandHome {
                input: input.to_string(),
                source: io::Error::new(
                    io::ErrorKind::Unsupported,
                    "cannot expand user-specific home directory",
                ),
            });
        }

        let home = self
            .home_directory()
            .ok_or_else(|| CompletionError::CouldNotExpandHome {
                input: input.to_string(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    "home directory could not be determined",
                ),
            })?;

        let home = home
            .to_str()
            .ok_or_else(|| CompletionError::CouldNotExpandHome {
                input: input.to_string(),
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    "home directory is not valid UTF-8",
                ),
            })?
            .to_string();

        let expanded = shellexpand::tilde_with_context(input, || Some(home));
        Ok(PathBuf::from(expanded.into_owned()))
    }

    /// Split an absolute path into the directory to list and the partial segment.
    ///
    /// A path naming an existing directory is listed whole. Otherwise the last
    /// segment is the partial and everything before it must be a directory.
    pub fn normalize(&self, path: &Path) -> CompletionResult<ResolvedPath> {
        if path.is_dir() {
            return Ok(ResolvedPath {
                directory: path.to_path_buf(),
                partial: String::new(),
            });
        }

        let text = path
            .to_str()
            .ok_or_else(|| CompletionError::CouldNotNormalizePath {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
            })?;

        let (prefix, partial) =
            split_last_segment(text).ok_or_else(|| CompletionError::CouldNotNormalizePath {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "path has no parent directory"),
            })?;

        let trimmed = prefix.trim_end_matches(is_separator);
        let directory = if trimmed.is_empty() {
            PathBuf::from(prefix)
        } else {
            PathBuf::from(trimmed)
        };
        match fs::metadata(&directory) {
            Ok(metadata) if metadata.is_dir() => Ok(ResolvedPath {
                directory,
                partial: partial.to_string(),
            }),
            Ok(_) => Err(CompletionError::NotADirectory { path: directory }),
            Err(source) => Err(CompletionError::CouldNotNormalizePath {
                path: directory,
                source,
            }),
        }
    }

    /// Expand then normalize
    pub fn resolve(&self, input: &str) -> CompletionResult<ResolvedPath> {
        let absolute = self.expand(input)?;
        self.normalize(&absolute)
    }
}

/// Split after the last separator: `("/a/b/", "c")` for `"/a/b/c"`.
///
/// The prefix keeps its trailing separator so a root prefix stays a root.
pub(crate) fn split_last_segment(text: &str) -> Option<(&str, &str)> {
    let idx = text.rfind(is_separator)?;
    Some((&text[..=idx], &text[idx + 1..]))
}
