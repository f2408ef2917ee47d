//! Feed rate scaling filter
//!
//! Unlike extrusion, a feed rate is an absolute rate, not an accumulated
//! position, so it is scaled directly with no running state. The F word
//! is modal on most firmwares: a line without one inherits the previous
//! rate, which was already scaled when it went past, so lines without an
//! F field need no handling here.

use printkit5_core::gcode::{first_number_after, replace_number_after, LineClass};
use printkit5_core::types::ValueHandle;

use crate::proxy::{FilterAction, LineFilter};

/// Multiplies the F field of movement lines by a live-adjustable ratio.
pub struct FeedRateMultiplierFilter {
    ratio: ValueHandle,
}

impl FeedRateMultiplierFilter {
    /// Create the filter around a shared ratio handle.
    pub fn new(ratio: ValueHandle) -> Self {
        Self { ratio }
    }
}

impl LineFilter for FeedRateMultiplierFilter {
    fn name(&self) -> &str {
        "feed_rate_multiplier"
    }

    fn process(&mut self, class: LineClass, line: String) -> FilterAction {
        if class == LineClass::Movement {
            if let Some(requested) = first_number_after('F', &line) {
                let scaled = requested * self.ratio.get();
                tracing::trace!(requested, scaled, "scaled feed rate");
                return FilterAction::Send(replace_number_after('F', &line, scaled));
            }
        }
        FilterAction::Send(line)
    }

    fn debug_state(&self) -> String {
        format!("ratio = {}", self.ratio.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printkit5_core::gcode::classify;

    fn run(filter: &mut FeedRateMultiplierFilter, line: &str) -> String {
        match filter.process(classify(line), line.to_string()) {
            FilterAction::Send(line) => line,
            other => panic!("expected Send, got {:?}", other),
        }
    }

    #[test]
    fn test_scales_feed_rate_on_movement() {
        let mut filter = FeedRateMultiplierFilter::new(ValueHandle::new(0.5));
        assert_eq!(run(&mut filter, "G1 X10 F1800"), "G1 X10 F900");
    }

    #[test]
    fn test_ratio_one_is_identity() {
        let mut filter = FeedRateMultiplierFilter::new(ValueHandle::new(1.0));
        assert_eq!(run(&mut filter, "G1 X10 F1800"), "G1 X10 F1800");
    }

    #[test]
    fn test_only_movement_lines_are_touched() {
        let mut filter = FeedRateMultiplierFilter::new(ValueHandle::new(2.0));
        // M204 carries numbers but is not a movement
        assert_eq!(run(&mut filter, "M204 S500"), "M204 S500");
        assert_eq!(run(&mut filter, "G1 X10 Y5"), "G1 X10 Y5");
    }

    #[test]
    fn test_live_ratio_change() {
        let ratio = ValueHandle::new(1.0);
        let mut filter = FeedRateMultiplierFilter::new(ratio.clone());
        assert_eq!(run(&mut filter, "G1 F1200"), "G1 F1200");
        ratio.set(1.5);
        assert_eq!(run(&mut filter, "G1 F1200"), "G1 F1800");
    }
}
