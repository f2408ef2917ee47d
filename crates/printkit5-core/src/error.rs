//! Error handling for PrintKit5
//!
//! Filter stages never surface errors: a malformed or absent numeric field
//! degrades to "forward the line unchanged", because a garbled line must not
//! stall motion control. The types here cover the boundaries around the
//! pipeline instead: assembling a chain from configuration and feeding it
//! from a file.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Pipeline assembly error type
///
/// Represents errors raised while building a filter chain from
/// configuration, before any line is streamed.
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    /// Filter name not known to the assembler
    #[error("Unknown filter: {name}")]
    UnknownFilter {
        /// The unrecognized filter name.
        name: String,
    },

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid pipeline configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// Generic pipeline error
    #[error("Pipeline error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for PrintKit5
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Pipeline assembly error
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a pipeline assembly error
    pub fn is_pipeline_error(&self) -> bool {
        matches!(self, Error::Pipeline(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
