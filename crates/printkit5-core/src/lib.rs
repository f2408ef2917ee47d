//! # PrintKit5 Core
//!
//! Core types and utilities for PrintKit5.
//! Provides the G-code text utilities the streaming pipeline calls into,
//! the error types shared across crates, and thread-safe handles for
//! scalar state adjusted live from outside the streaming thread.

pub mod error;
pub mod gcode;
pub mod types;

pub use error::{Error, PipelineError, Result};

pub use gcode::{
    classify, first_number_after, format_field_value, is_movement, is_position_reset,
    replace_number_after, LineClass, PASS_THROUGH_MARKER,
};

// Re-export type aliases for convenience
pub use types::{
    thread_safe, thread_safe_deque, thread_safe_rw, ThreadSafe, ThreadSafeDeque, ThreadSafeRw,
    ValueHandle,
};
