//! Documentation build command.

use anyhow::Result;
use lazers_doc_build::{BuildConfig, DocBuilder};

/// Run the build command.
pub fn run(config: BuildConfig) -> Result<()> {
    tracing::info!("Building documentation...");

    let result = DocBuilder::new(config).build()?;

    tracing::info!(
        "Built {} pages and the README index in {}ms",
        result.documents,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
