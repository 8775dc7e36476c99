//! External renderers that turn markdown plus a template into HTML.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::config::ConverterConfig;

/// Errors that can occur while rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed on {input} ({status})")]
    Failed {
        program: String,
        input: PathBuf,
        status: ExitStatus,
    },
}

/// Trait for out-of-process document renderers.
pub trait Renderer: Send + Sync {
    /// Renderer identifier used in logs
    fn name(&self) -> &str;

    /// Render `source` through `template` into `output`.
    ///
    /// Blocks until the document is written or rendering fails.
    fn render(&self, source: &Path, template: &Path, output: &Path) -> Result<(), RenderError>;
}

/// Renderer backed by a pandoc-compatible command line tool.
#[derive(Debug, Clone)]
pub struct PandocRenderer {
    config: ConverterConfig,
    working_dir: PathBuf,
}

impl PandocRenderer {
    /// Create a renderer that runs the converter inside `working_dir`.
    pub fn new(config: ConverterConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            working_dir: working_dir.into(),
        }
    }

    /// Build the argument list for one conversion.
    pub fn args(&self, source: &Path, template: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            source.display().to_string(),
            self.config.smart_flag.clone(),
            "--template".to_string(),
            template.display().to_string(),
            self.config.standalone_flag.clone(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        args.extend(self.config.extra_args.iter().cloned());
        args
    }

    /// Check that the converter can be run at all.
    pub fn ensure_ready(&self) -> Result<String, RenderError> {
        let output = Command::new(&self.config.program)
            .arg("--version")
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                program: self.config.program.clone(),
                input: PathBuf::from("--version"),
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn spawn_error(&self, source: std::io::Error) -> RenderError {
        RenderError::Spawn {
            program: self.config.program.clone(),
            source,
        }
    }
}

impl Renderer for PandocRenderer {
    fn name(&self) -> &str {
        &self.config.program
    }

    fn render(&self, source: &Path, template: &Path, output: &Path) -> Result<(), RenderError> {
        let args = self.args(source, template, output);
        tracing::debug!("Running {} {}", self.config.program, args.join(" "));

        let status = Command::new(&self.config.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(RenderError::Failed {
                program: self.config.program.clone(),
                input: source.to_path_buf(),
                status,
            });
        }

        Ok(())
    }
}
