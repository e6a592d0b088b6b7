// File system utilities

use std::{io, path::Path};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for listing a single directory
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Whether to include entries whose name starts with a dot
    pub include_hidden: bool,
    /// Whether to follow symbolic links when deciding if an entry is a directory
    pub follow_links: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
            follow_links: true,
        }
    }
}

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
}

/// Dot-prefixed names are hidden; `.` and `..` themselves are not.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

/// List the immediate children of `root` in file-name order.
///
/// Failing to open `root` itself is an error. A child that cannot be
/// inspected is logged and skipped.
pub fn list_directory<P: AsRef<Path>>(root: P, config: &ListConfig) -> io::Result<Vec<EntryInfo>> {
    let root = root.as_ref();
    debug!("Listing directory: {} with config: {:?}", root.display(), config);

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut entries = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Error reading directory entry: {}", e);
                continue;
            }
        };

        let name = match entry.file_name().to_str() {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping non UTF-8 entry: {}", entry.path().display());
                continue;
            }
        };

        if !config.include_hidden && is_hidden_name(&name) {
            continue;
        }

        let file_type = entry.file_type();
        let is_dir = file_type.is_dir()
            || (config.follow_links && file_type.is_symlink() && entry.path().is_dir());

        entries.push(EntryInfo { name, is_dir });
    }

    debug!("Found {} entries", entries.len());
    Ok(entries)
}
