//! Baby-step Z offset filter
//!
//! Nudges the whole print up or down by a live-adjustable offset,
//! typically a few hundredths of a millimeter, to dial in first-layer
//! squish while the print runs. The offset is a physical correction
//! applied to every commanded Z, so a G92 rebaseline passes through
//! untouched: subsequent absolute Z values still receive the offset.

use printkit5_core::gcode::{first_number_after, replace_number_after, LineClass};
use printkit5_core::types::ValueHandle;

use crate::proxy::{FilterAction, LineFilter};

/// Adds a shared offset to the Z field of movement lines.
pub struct BabyStepOffsetFilter {
    offset: ValueHandle,
}

impl BabyStepOffsetFilter {
    /// Create the filter around a shared offset handle.
    pub fn new(offset: ValueHandle) -> Self {
        Self { offset }
    }
}

impl LineFilter for BabyStepOffsetFilter {
    fn name(&self) -> &str {
        "baby_step_offset"
    }

    fn process(&mut self, class: LineClass, line: String) -> FilterAction {
        if class == LineClass::Movement {
            if let Some(requested) = first_number_after('Z', &line) {
                let adjusted = requested + self.offset.get();
                tracing::trace!(requested, adjusted, "applied baby-step offset");
                return FilterAction::Send(replace_number_after('Z', &line, adjusted));
            }
        }
        FilterAction::Send(line)
    }

    fn debug_state(&self) -> String {
        format!("offset = {}", self.offset.get())
    }
}
