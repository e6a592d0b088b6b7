use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::completions::DEFAULT_PAGE_SIZE;

/// Completer configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompleterConfig {
    /// Number of candidates visible at once
    pub page_size: usize,

    /// Placed between candidates when rendering a page
    pub separator: String,

    /// List dot-files as candidates
    pub include_hidden: bool,
}

impl Default for CompleterConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            separator: " ".to_string(),
            include_hidden: false,
        }
    }
}

/// Values read from a configuration file; unset keys leave the current value
#[derive(Debug, Deserialize)]
struct FileConfig {
    page_size: Option<usize>,
    separator: Option<String>,
    include_hidden: Option<bool>,
}

impl CompleterConfig {
    /// Build the configuration from defaults, a config file and the environment.
    ///
    /// `explicit` names a file that must exist. Without it the usual
    /// locations are searched and a missing file is not an error.
    pub async fn init(explicit: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = Self::default();

        match explicit {
            Some(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                config.merge_json(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?;
            }
            None => {
                if let Some(path) = Self::find_config_file() {
                    debug!("Loading configuration from: {}", path.display());
                    let content = tokio::fs::read_to_string(&path).await?;
                    if let Err(e) = config.merge_json(&content) {
                        warn!("Ignoring invalid config file {}: {}", path.display(), e);
                    }
                }
            }
        }

        config.load_from_env();
        config.normalize();

        Ok(config)
    }

    /// Candidate config file locations, highest priority first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./.tabcomplete.json"),
            PathBuf::from("./tabcomplete.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tabcomplete").join("tabcomplete.json"));
        }

        paths
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|path| path.exists())
    }

    /// Overlay the keys present in a JSON document
    pub fn merge_json(&mut self, content: &str) -> Result<()> {
        let file: FileConfig = serde_json::from_str(content)?;

        if let Some(page_size) = file.page_size {
            self.page_size = page_size;
        }
        if let Some(separator) = file.separator {
            self.separator = separator;
        }
        if let Some(include_hidden) = file.include_hidden {
            self.include_hidden = include_hidden;
        }

        self.normalize();
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TABCOMPLETE_PAGE_SIZE") {
            match value.trim().parse() {
                Ok(page_size) => self.page_size = page_size,
                Err(_) => warn!("Ignoring TABCOMPLETE_PAGE_SIZE={:?}", value),
            }
        }

        if let Some(separator) = lookup("TABCOMPLETE_SEPARATOR") {
            self.separator = separator;
        }

        if let Some(value) = lookup("TABCOMPLETE_INCLUDE_HIDDEN") {
            self.include_hidden = matches!(value.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        self.normalize();
    }

    /// Apply command line overrides
    pub fn with_overrides(
        mut self,
        page_size: Option<usize>,
        separator: Option<String>,
        include_hidden: bool,
    ) -> Self {
        if let Some(page_size) = page_size {
            self.page_size = page_size;
        }
        if let Some(separator) = separator {
            self.separator = separator;
        }
        if include_hidden {
            self.include_hidden = true;
        }

        self.normalize();
        self
    }

    fn normalize(&mut self) {
        if self.page_size < 1 {
            debug!("page_size {} coerced to {}", self.page_size, DEFAULT_PAGE_SIZE);
            self.page_size = DEFAULT_PAGE_SIZE;
        }
    }
}
