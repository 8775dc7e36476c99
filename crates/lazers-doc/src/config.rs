//! Configuration file structure (lazers-doc.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lazers_doc_build::{BuildConfig, ConverterConfig};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "lazers-doc.toml";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    sources: SourcesConfig,
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    readme: ReadmeConfig,
    #[serde(default)]
    converter: ConverterSettings,
}

#[derive(Debug, Deserialize, Default)]
struct SourcesConfig {
    pattern: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct OutputConfig {
    dir: Option<PathBuf>,
    template: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct ReadmeConfig {
    source: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct ConverterSettings {
    program: Option<String>,
    smart_flag: Option<String>,
    standalone_flag: Option<String>,
    #[serde(default)]
    extra_args: Vec<String>,
}

impl ConfigFile {
    /// Merge file settings over the defaults. `converter` overrides the file.
    pub fn into_build_config(self, root: &Path, converter: Option<String>) -> BuildConfig {
        let defaults = BuildConfig::with_root(root);
        let converter_defaults = ConverterConfig::default();

        BuildConfig {
            pattern: self.sources.pattern.unwrap_or(defaults.pattern),
            output_dir: self.output.dir.unwrap_or(defaults.output_dir),
            template: self.output.template.unwrap_or(defaults.template),
            readme: self.readme.source.unwrap_or(defaults.readme),
            readme_output: self.readme.output.unwrap_or(defaults.readme_output),
            converter: ConverterConfig {
                program: converter
                    .or(self.converter.program)
                    .unwrap_or(converter_defaults.program),
                smart_flag: self
                    .converter
                    .smart_flag
                    .unwrap_or(converter_defaults.smart_flag),
                standalone_flag: self
                    .converter
                    .standalone_flag
                    .unwrap_or(converter_defaults.standalone_flag),
                extra_args: self.converter.extra_args,
            },
            root: defaults.root,
        }
    }
}

/// Load configuration from `root/path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(root: &Path, path: &Path) -> Result<ConfigFile> {
    let config_path = root.join(path);
    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = parse_config(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        tracing::info!("Loaded config from {}", config_path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}
