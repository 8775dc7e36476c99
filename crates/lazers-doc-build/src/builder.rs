//! Documentation site builder.

use std::path::PathBuf;
use std::time::Instant;

use crate::config::BuildConfig;
use crate::discovery::{discover_sources, DiscoveryError};
use crate::job::{ensure_dir, plan, DocumentJob, PlanError};
use crate::renderer::{PandocRenderer, RenderError, Renderer};

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of source documents converted
    pub documents: usize,

    /// Whether the README index page was converted
    pub readme: bool,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Drives one conversion run over the configured sources.
pub struct DocBuilder<R = PandocRenderer> {
    config: BuildConfig,
    renderer: R,
}

impl DocBuilder<PandocRenderer> {
    /// Create a builder that shells out to the configured converter.
    pub fn new(config: BuildConfig) -> Self {
        let renderer = PandocRenderer::new(config.converter.clone(), config.root.clone());
        Self { config, renderer }
    }
}

impl<R: Renderer> DocBuilder<R> {
    /// Create a builder with a custom renderer.
    pub fn with_renderer(config: BuildConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Find the source documents for this run, relative to the root.
    pub fn discover(&self) -> Result<Vec<PathBuf>, BuildError> {
        Ok(discover_sources(&self.config.root, &self.config.pattern)?)
    }

    /// Plan a job for every discovered source, in discovery order.
    pub fn plan_jobs(&self) -> Result<Vec<DocumentJob>, BuildError> {
        self.discover()?
            .iter()
            .map(|source| plan(&self.config.output_dir, source).map_err(BuildError::from))
            .collect()
    }

    /// The fixed job converting the README into the site index.
    pub fn readme_job(&self) -> DocumentJob {
        let output_file = self.config.readme_output.clone();
        let output_dir = output_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();

        DocumentJob {
            source: self.config.readme.clone(),
            output_dir,
            output_file,
        }
    }

    /// Run the build: convert every source, then the README.
    ///
    /// Stops at the first failure. Later documents and the README are
    /// not converted.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let sources = self.discover()?;
        tracing::info!(
            "Converting {} documents with {}",
            sources.len(),
            self.renderer.name()
        );

        let mut documents = 0;
        for source in &sources {
            let job = plan(&self.config.output_dir, source)?;
            self.run_job(&job, true)?;
            documents += 1;
        }

        self.build_readme_index()?;

        Ok(BuildResult {
            documents,
            readme: true,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.resolve(&self.config.output_dir),
        })
    }

    /// Convert the README into the site index page.
    pub fn build_readme_index(&self) -> Result<(), BuildError> {
        self.run_job(&self.readme_job(), false)
    }

    fn run_job(&self, job: &DocumentJob, create_dir: bool) -> Result<(), BuildError> {
        if create_dir {
            let dir = self.config.resolve(&job.output_dir);
            ensure_dir(&dir).map_err(|e| BuildError::CreateDir {
                path: dir.clone(),
                source: e,
            })?;
        }

        self.renderer
            .render(&job.source, &self.config.template, &job.output_file)?;

        tracing::info!(
            "{} -> {}",
            job.source.display(),
            job.output_file.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Records every render call; optionally fails on one source.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(PathBuf, PathBuf, PathBuf)>>,
        fail_on: Option<PathBuf>,
    }

    impl RecordingRenderer {
        fn failing_on(source: &str) -> Self {
            Self {
                fail_on: Some(PathBuf::from(source)),
                ..Default::default()
            }
        }

        fn sources(&self) -> Vec<PathBuf> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(source, _, _)| source.clone())
                .collect()
        }
    }

    impl Renderer for RecordingRenderer {
        fn name(&self) -> &str {
            "recording"
        }

        fn render(
            &self,
            source: &Path,
            template: &Path,
            output: &Path,
        ) -> Result<(), RenderError> {
            if self.fail_on.as_deref() == Some(source) {
                return Err(RenderError::Spawn {
                    program: "recording".to_string(),
                    source: std::io::Error::other("boom"),
                });
            }

            self.calls.lock().unwrap().push((
                source.to_path_buf(),
                template.to_path_buf(),
                output.to_path_buf(),
            ));
            Ok(())
        }
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# doc\n").unwrap();
    }

    #[test]
    fn converts_sources_then_readme() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "README.md");
        touch(temp.path(), "lazers1/guide/intro.md");
        touch(temp.path(), "lazers2/api.md");

        let builder = DocBuilder::with_renderer(
            BuildConfig::with_root(temp.path()),
            RecordingRenderer::default(),
        );
        let result = builder.build().unwrap();

        assert_eq!(result.documents, 2);
        assert!(result.readme);

        let calls = builder.renderer().calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                (
                    PathBuf::from("lazers1/guide/intro.md"),
                    PathBuf::from("doc/_templates/page.template"),
                    PathBuf::from("doc/lazers1/guide/intro/index.html"),
                ),
                (
                    PathBuf::from("lazers2/api.md"),
                    PathBuf::from("doc/_templates/page.template"),
                    PathBuf::from("doc/lazers2/api/index.html"),
                ),
                (
                    PathBuf::from("README.md"),
                    PathBuf::from("doc/_templates/page.template"),
                    PathBuf::from("doc/index.html"),
                ),
            ]
        );
    }

    #[test]
    fn creates_output_directories() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "lazers1/guide/intro.md");

        let builder = DocBuilder::with_renderer(
            BuildConfig::with_root(temp.path()),
            RecordingRenderer::default(),
        );
        builder.build().unwrap();

        assert!(temp.path().join("doc/lazers1/guide/intro").is_dir());
    }

    #[test]
    fn rebuild_over_existing_output_succeeds() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "lazers1/intro.md");
        fs::create_dir_all(temp.path().join("doc/lazers1/intro")).unwrap();

        let builder = DocBuilder::with_renderer(
            BuildConfig::with_root(temp.path()),
            RecordingRenderer::default(),
        );

        assert_eq!(builder.build().unwrap().documents, 1);
    }

    #[test]
    fn readme_converted_once_with_no_sources() {
        let temp = tempdir().unwrap();

        let builder = DocBuilder::with_renderer(
            BuildConfig::with_root(temp.path()),
            RecordingRenderer::default(),
        );
        let result = builder.build().unwrap();

        assert_eq!(result.documents, 0);
        assert_eq!(builder.renderer().sources(), vec![PathBuf::from("README.md")]);
    }

    #[test]
    fn failure_stops_the_run() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "lazers1/a.md");
        touch(temp.path(), "lazers1/b.md");
        touch(temp.path(), "lazers1/c.md");

        let builder = DocBuilder::with_renderer(
            BuildConfig::with_root(temp.path()),
            RecordingRenderer::failing_on("lazers1/b.md"),
        );
        let result = builder.build();

        assert!(matches!(result, Err(BuildError::Render(_))));
        assert_eq!(builder.renderer().sources(), vec![PathBuf::from("lazers1/a.md")]);
    }

    #[test]
    fn plans_jobs_without_side_effects() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "lazers1/guide/intro.md");

        let builder = DocBuilder::with_renderer(
            BuildConfig::with_root(temp.path()),
            RecordingRenderer::default(),
        );
        let jobs = builder.plan_jobs().unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].output_file,
            PathBuf::from("doc/lazers1/guide/intro/index.html")
        );
        assert!(!temp.path().join("doc").exists());
        assert!(builder.renderer().sources().is_empty());
    }

    #[test]
    fn readme_job_targets_site_index() {
        let builder = DocBuilder::with_renderer(BuildConfig::default(), RecordingRenderer::default());

        let job = builder.readme_job();

        assert_eq!(job.source, PathBuf::from("README.md"));
        assert_eq!(job.output_dir, PathBuf::from("doc"));
        assert_eq!(job.output_file, PathBuf::from("doc/index.html"));
    }

    #[test]
    fn honours_custom_layout() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "guides/setup.md");

        let config = BuildConfig {
            pattern: "guides/**/*.md".to_string(),
            output_dir: PathBuf::from("site"),
            template: PathBuf::from("site/page.html"),
            readme_output: PathBuf::from("site/index.html"),
            ..BuildConfig::with_root(temp.path())
        };
        let builder = DocBuilder::with_renderer(config, RecordingRenderer::default());
        builder.build().unwrap();

        let calls = builder.renderer().calls.lock().unwrap().clone();
        assert_eq!(calls[0].1, PathBuf::from("site/page.html"));
        assert_eq!(calls[0].2, PathBuf::from("site/guides/setup/index.html"));
        assert_eq!(calls[1].2, PathBuf::from("site/index.html"));
    }
}
