//! Build configuration.

use std::path::{Path, PathBuf};

/// Configuration for a documentation build.
///
/// All paths except `root` are relative to `root`.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory the build runs in
    pub root: PathBuf,

    /// Glob pattern selecting source documents
    pub pattern: String,

    /// Output root
    pub output_dir: PathBuf,

    /// Template passed to the converter
    pub template: PathBuf,

    /// README converted into the site index
    pub readme: PathBuf,

    /// Output file for the README
    pub readme_output: PathBuf,

    /// External converter settings
    pub converter: ConverterConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            pattern: "lazers*/**/*md".to_string(),
            output_dir: PathBuf::from("doc"),
            template: PathBuf::from("doc/_templates/page.template"),
            readme: PathBuf::from("README.md"),
            readme_output: PathBuf::from("doc/index.html"),
            converter: ConverterConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Create a default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Resolve a root-relative path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// Settings for the external document converter.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfig {
    /// Program to invoke
    pub program: String,

    /// Flag enabling typographic substitutions
    pub smart_flag: String,

    /// Flag requesting a standalone document
    pub standalone_flag: String,

    /// Arguments appended after the fixed ones
    pub extra_args: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
            smart_flag: "--smart".to_string(),
            standalone_flag: "-s".to_string(),
            extra_args: vec![],
        }
    }
}
