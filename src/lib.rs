//! # PrintKit5
//!
//! A composable G-code streaming pipeline for 3D printers.
//!
//! ## Architecture
//!
//! PrintKit5 is organized as a workspace with multiple crates:
//!
//! 1. **printkit5-core** - Error types, G-code text utilities, shared-state handles
//! 2. **printkit5-pipeline** - Stage contract, proxy plumbing, filters, assembler
//! 3. **printkit5** - Binary that streams a file through a configured chain
//!
//! ## Features
//!
//! - **Composable filters**: extrusion compensation, feed rate scaling, baby stepping
//! - **Live adjustment**: every scalar tunable from another thread mid-print
//! - **Side-channel injection**: interactive commands merged into a running stream
//! - **Config-driven assembly**: chain ordering described in JSON

pub use printkit5_core::{Error, PipelineError, Result, ValueHandle};
pub use printkit5_pipeline::{
    CommandQueue, FileLineSource, FilterKind, GcodeStream, LineFilter, Pipeline, PipelineBuilder,
    PipelineConfig, PipelineHandles, StreamProxy, StringLineSource, VecLineSource,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, keeping stdout free for the processed stream
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
