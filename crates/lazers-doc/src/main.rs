//! lazers-doc CLI - builds the lazers HTML documentation with pandoc.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "lazers-doc")]
#[command(about = "Build the lazers HTML documentation from markdown sources")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config file, relative to the root
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory to build in
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every source document and the README (default)
    Build {
        /// Converter program to run instead of the configured one
        #[arg(long)]
        converter: Option<String>,
    },

    /// List the planned conversions without running them
    Plan {
        /// Print jobs as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify the converter, template and README are usable
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let file_config = config::load_config(&cli.root, &cli.config)?;

    // Execute command
    match cli.command.unwrap_or(Commands::Build { converter: None }) {
        Commands::Build { converter } => {
            commands::build::run(file_config.into_build_config(&cli.root, converter))?;
        }
        Commands::Plan { json } => {
            commands::plan::run(file_config.into_build_config(&cli.root, None), json)?;
        }
        Commands::Check => {
            commands::check::run(file_config.into_build_config(&cli.root, None))?;
        }
    }

    Ok(())
}
