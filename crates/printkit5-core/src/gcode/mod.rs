//! G-code text utilities
//!
//! This module provides:
//! - Numeric field extraction and in-place replacement
//! - Per-line classification for the streaming filters
//! - The stream-wide pass-through sentinel
//!
//! These helpers are deliberately tolerant: an absent key or a malformed
//! numeric literal is reported as "no field", never as an error.

pub mod line;
pub mod params;

pub use line::{classify, is_movement, is_position_reset, LineClass, PASS_THROUGH_MARKER};
pub use params::{first_number_after, format_field_value, replace_number_after};
