//! Source document discovery.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

/// Match options equivalent to a shell glob: `*` stops at separators and
/// never matches a leading dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Errors that can occur during discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Invalid source pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Source root not found: {0}")]
    MissingRoot(PathBuf),
}

/// Find all regular files under `root` whose root-relative path matches `pattern`.
///
/// Returned paths are relative to `root`, in walk order.
pub fn discover_sources(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let pattern = Pattern::new(pattern).map_err(|e| DiscoveryError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    if !root.is_dir() {
        return Err(DiscoveryError::MissingRoot(root.to_path_buf()));
    }

    let mut sources = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if pattern.matches_path_with(relative, MATCH_OPTIONS) {
            sources.push(relative.to_path_buf());
        }
    }

    tracing::debug!(
        "Discovered {} sources matching '{}' in {}",
        sources.len(),
        pattern,
        root.display()
    );

    Ok(sources)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}
