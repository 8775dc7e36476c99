//! Document jobs: where each source lands in the output tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// File name every page is written to.
pub const PAGE_FILE: &str = "index.html";

/// A single source-to-output conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentJob {
    /// Source markdown file
    pub source: PathBuf,

    /// Directory holding the page
    pub output_dir: PathBuf,

    /// Page written by the converter
    pub output_file: PathBuf,
}

/// Errors that can occur when planning a job.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Source has no parent directory: {0}")]
    NoParent(PathBuf),

    #[error("Source has no file name: {0}")]
    NoFileName(PathBuf),
}

/// Plan the output location for `source` under `output_root`.
///
/// `lazers1/guide/intro.md` becomes `<output_root>/lazers1/guide/intro/index.html`.
pub fn plan(output_root: &Path, source: &Path) -> Result<DocumentJob, PlanError> {
    let parent = source
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| PlanError::NoParent(source.to_path_buf()))?;

    let file_name = source
        .file_name()
        .ok_or_else(|| PlanError::NoFileName(source.to_path_buf()))?
        .to_string_lossy();

    // Only a literal ".md" suffix is dropped; "notes.rmd" keeps its name.
    let name = file_name
        .strip_suffix(".md")
        .filter(|stem| !stem.is_empty())
        .unwrap_or(&file_name);

    let output_dir = output_root.join(parent).join(name);
    let output_file = output_dir.join(PAGE_FILE);

    Ok(DocumentJob {
        source: source.to_path_buf(),
        output_dir,
        output_file,
    })
}

/// Create `dir` and any missing ancestors. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}
