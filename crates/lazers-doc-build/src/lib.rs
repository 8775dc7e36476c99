//! Documentation builder for the lazers workspace.
//!
//! Discovers markdown sources, plans where each one lands in the output tree,
//! and hands every document to an external renderer such as pandoc.

pub mod builder;
pub mod config;
pub mod discovery;
pub mod job;
pub mod renderer;

pub use builder::{BuildError, BuildResult, DocBuilder};
pub use config::{BuildConfig, ConverterConfig};
pub use discovery::{discover_sources, DiscoveryError};
pub use job::{ensure_dir, plan, DocumentJob, PlanError};
pub use renderer::{PandocRenderer, RenderError, Renderer};
