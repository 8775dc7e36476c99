//! Dry-run listing of document jobs.

use anyhow::{Context, Result};
use lazers_doc_build::{BuildConfig, DocBuilder, DocumentJob};

/// Run the plan command.
pub fn run(config: BuildConfig, json: bool) -> Result<()> {
    let builder = DocBuilder::new(config);

    let mut jobs = builder.plan_jobs()?;
    jobs.push(builder.readme_job());

    if json {
        let out = serde_json::to_string_pretty(&jobs).context("Failed to serialize jobs")?;
        println!("{}", out);
    } else {
        for job in &jobs {
            println!("{}", describe(job));
        }
    }

    Ok(())
}

fn describe(job: &DocumentJob) -> String {
    format!("{} -> {}", job.source.display(), job.output_file.display())
}
