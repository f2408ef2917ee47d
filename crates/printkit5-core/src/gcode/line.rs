//! Per-line classification
//!
//! Every transforming stage needs the same cheap questions answered about
//! a line: is it a coordinated movement, a coordinate-system reset, or a
//! line flagged to bypass processing entirely? Classification is computed
//! once per line by the stage plumbing and handed to the filter, so the
//! prefix scanning is not repeated in every stage.

/// Trailing sentinel that forces every transforming stage to forward a
/// line byte-identical, with no parsing and no state update.
pub const PASS_THROUGH_MARKER: &str = "; NO_PROCESSING";

/// Classification of one command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Coordinated axis motion (G0..G3)
    Movement,
    /// Coordinate baseline redefinition without motion (G92)
    PositionReset,
    /// Line carrying the pass-through sentinel
    PassThrough,
    /// Anything else
    Other,
}

/// Parse the opcode number of a leading G word, if the line has one.
fn g_opcode(line: &str) -> Option<u32> {
    let trimmed = line.trim_start();
    let rest = trimmed
        .strip_prefix('G')
        .or_else(|| trimmed.strip_prefix('g'))?;
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    digits.parse().ok()
}

/// Whether the line commands coordinated axis motion.
pub fn is_movement(line: &str) -> bool {
    matches!(g_opcode(line), Some(0..=3))
}

/// Whether the line redefines the coordinate baseline (G92).
pub fn is_position_reset(line: &str) -> bool {
    g_opcode(line) == Some(92)
}

/// Classify a line. The pass-through sentinel wins over everything else.
pub fn classify(line: &str) -> LineClass {
    if line.ends_with(PASS_THROUGH_MARKER) {
        LineClass::PassThrough
    } else if is_movement(line) {
        LineClass::Movement
    } else if is_position_reset(line) {
        LineClass::PositionReset
    } else {
        LineClass::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_opcodes() {
        assert!(is_movement("G0 X10"));
        assert!(is_movement("G1 E2.5"));
        assert!(is_movement("G2 X1 Y1 I0.5"));
        assert!(is_movement("g3 X1 Y1 J0.5"));
        assert!(is_movement("G01 X5"));
    }

    #[test]
    fn test_non_movement_opcodes() {
        assert!(!is_movement("G28"));
        assert!(!is_movement("G10 P1"));
        assert!(!is_movement("G92 E0"));
        assert!(!is_movement("M106 S255"));
        assert!(!is_movement(""));
    }

    #[test]
    fn test_position_reset() {
        assert!(is_position_reset("G92 E0"));
        assert!(is_position_reset("  G92 X0 Y0"));
        assert!(!is_position_reset("G9 X0"));
        assert!(!is_position_reset("G921"));
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(classify("G1 E5"), LineClass::Movement);
        assert_eq!(classify("G92 E0"), LineClass::PositionReset);
        assert_eq!(classify("M104 S210"), LineClass::Other);
        // Sentinel outranks the movement opcode
        assert_eq!(classify("G1 E5 ; NO_PROCESSING"), LineClass::PassThrough);
    }
}
