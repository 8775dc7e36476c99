//! Environment check command.

use anyhow::Result;
use lazers_doc_build::{BuildConfig, PandocRenderer};

/// Run the check command.
pub fn run(config: BuildConfig) -> Result<()> {
    let mut problems = 0;

    let renderer = PandocRenderer::new(config.converter.clone(), config.root.clone());
    match renderer.ensure_ready() {
        Ok(version) => tracing::info!("Converter: {}", version),
        Err(e) => {
            tracing::error!("{}", e);
            problems += 1;
        }
    }

    for (label, path) in [("Template", &config.template), ("README", &config.readme)] {
        let resolved = config.resolve(path);
        if resolved.is_file() {
            tracing::info!("{}: {}", label, path.display());
        } else {
            tracing::error!("{} not found: {}", label, resolved.display());
            problems += 1;
        }
    }

    if problems > 0 {
        anyhow::bail!("{} problem(s) found", problems);
    }

    tracing::info!("Ready to build");
    Ok(())
}
