//! Extrusion compensation filter
//!
//! Scales extrusion *deltas* by a live-adjustable ratio. Slicers emit
//! absolute E positions, so compensation must track two values: the last
//! position the slicer asked for, and the position actually commanded
//! downstream after scaling. Each movement's requested delta is scaled
//! and accumulated onto the actual position; the E field is rewritten to
//! that actual value. Scaling deltas rather than absolutes is what lets
//! a mid-print ratio change affect only subsequent extrusion without
//! retroactively distorting the accumulated position.

use printkit5_core::gcode::{first_number_after, replace_number_after, LineClass};
use printkit5_core::types::ValueHandle;

use crate::proxy::{FilterAction, LineFilter};

/// Delta-based E-field compensation.
pub struct ExtrusionMultiplierFilter {
    ratio: ValueHandle,
    /// Position actually commanded downstream after compensation.
    actual_extrusion_position: f64,
    /// Last uncompensated position requested by the slicer.
    requested_extrusion_position: f64,
}

impl ExtrusionMultiplierFilter {
    /// Create the filter around a shared ratio handle.
    ///
    /// The handle is injected rather than read from global state so that
    /// pipelines for different printers stay independent.
    pub fn new(ratio: ValueHandle) -> Self {
        Self {
            ratio,
            actual_extrusion_position: 0.0,
            requested_extrusion_position: 0.0,
        }
    }
}

impl LineFilter for ExtrusionMultiplierFilter {
    fn name(&self) -> &str {
        "extrusion_multiplier"
    }

    fn process(&mut self, class: LineClass, line: String) -> FilterAction {
        match class {
            LineClass::Movement => {
                if let Some(requested) = first_number_after('E', &line) {
                    let delta = requested - self.requested_extrusion_position;
                    let actual = self.actual_extrusion_position + delta * self.ratio.get();
                    let rewritten = replace_number_after('E', &line, actual);
                    // Both values move together; the next delta must be
                    // relative to a consistent baseline.
                    self.requested_extrusion_position = requested;
                    self.actual_extrusion_position = actual;
                    tracing::trace!(requested, actual, "compensated extrusion");
                    FilterAction::Send(rewritten)
                } else {
                    FilterAction::Send(line)
                }
            }
            LineClass::PositionReset => {
                // A reset establishes a new baseline, not a delta to
                // compensate: both tracked values become the requested
                // value and the line is forwarded unscaled.
                if let Some(requested) = first_number_after('E', &line) {
                    self.requested_extrusion_position = requested;
                    self.actual_extrusion_position = requested;
                }
                FilterAction::Send(line)
            }
            _ => FilterAction::Send(line),
        }
    }

    fn debug_state(&self) -> String {
        format!("ratio = {}", self.ratio.get())
    }
}
