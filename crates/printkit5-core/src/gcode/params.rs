//! Numeric field extraction and replacement
//!
//! A G-code word is a single letter key followed directly by a signed
//! decimal literal (`G1 X10.5 E2.75`). Words may be packed without
//! whitespace (`G1X10E2.5`), and anything after a `;` is a comment that
//! must never be parsed or disturbed.

use std::ops::Range;

/// Length of the code portion of a line, excluding any trailing comment.
fn code_len(line: &str) -> usize {
    line.find(';').unwrap_or(line.len())
}

/// Locate the numeric literal following `key`, returning its byte range
/// and parsed value.
///
/// The key match is case-insensitive and must not be preceded by another
/// letter, so the `E` in `ENABLE` or in a comment never matches. If the
/// key occurs without a parseable number after it, scanning continues at
/// the next occurrence.
fn number_span_after(key: char, line: &str) -> Option<(Range<usize>, f64)> {
    let key = key.to_ascii_uppercase();
    let code = &line[..code_len(line)];
    let bytes = code.as_bytes();

    for i in 0..bytes.len() {
        if (bytes[i] as char).to_ascii_uppercase() != key {
            continue;
        }
        if i > 0 && (bytes[i - 1] as char).is_ascii_alphabetic() {
            continue;
        }

        let start = i + 1;
        let mut end = start;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let mut saw_digit = false;
        let mut saw_dot = false;
        while end < bytes.len() {
            match bytes[end] {
                b'0'..=b'9' => saw_digit = true,
                b'.' if !saw_dot => saw_dot = true,
                _ => break,
            }
            end += 1;
        }

        if saw_digit {
            if let Ok(value) = code[start..end].parse::<f64>() {
                return Some((start..end, value));
            }
        }
    }

    None
}

/// Find and parse the first numeric literal following `key`.
///
/// Returns `None` when the key is absent or no parseable number follows
/// it. Absence is not an error: the caller forwards the line without the
/// field-specific transform.
pub fn first_number_after(key: char, line: &str) -> Option<f64> {
    number_span_after(key, line).map(|(_, value)| value)
}

/// Format a field value the way slicers emit them: up to five decimal
/// places, trailing zeros and a bare decimal point trimmed.
pub fn format_field_value(value: f64) -> String {
    let mut formatted = format!("{:.5}", value);
    if formatted.contains('.') {
        while formatted.ends_with('0') {
            formatted.pop();
        }
        if formatted.ends_with('.') {
            formatted.pop();
        }
    }
    formatted
}

/// Rewrite only the numeric literal following `key`, preserving every
/// other token verbatim, including any trailing comment.
///
/// If the field is absent the line is returned unchanged.
pub fn replace_number_after(key: char, line: &str, new_value: f64) -> String {
    match number_span_after(key, line) {
        Some((span, _)) => format!(
            "{}{}{}",
            &line[..span.start],
            format_field_value(new_value),
            &line[span.end..]
        ),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_number_after_basic() {
        assert_eq!(first_number_after('E', "G1 X10 E2.5"), Some(2.5));
        assert_eq!(first_number_after('E', "G1 E-0.75"), Some(-0.75));
        assert_eq!(first_number_after('X', "G1 X10 E2.5"), Some(10.0));
    }

    #[test]
    fn test_first_number_after_packed_words() {
        assert_eq!(first_number_after('E', "G1X10E2.5"), Some(2.5));
        assert_eq!(first_number_after('X', "G1X10E2.5"), Some(10.0));
    }

    #[test]
    fn test_first_number_after_case_insensitive() {
        assert_eq!(first_number_after('e', "G1 E3"), Some(3.0));
        assert_eq!(first_number_after('E', "g1 e3"), Some(3.0));
    }

    #[test]
    fn test_first_number_after_absent_key() {
        assert_eq!(first_number_after('E', "G1 X10 Y20"), None);
        assert_eq!(first_number_after('E', "M106 S255"), None);
        assert_eq!(first_number_after('E', ""), None);
    }

    #[test]
    fn test_first_number_after_malformed_number() {
        // A key with no parseable literal behind it is "field absent"
        assert_eq!(first_number_after('E', "G1 E"), None);
        assert_eq!(first_number_after('E', "G1 E abc"), None);
    }

    #[test]
    fn test_first_number_after_skips_comments() {
        assert_eq!(first_number_after('E', "G1 X10 ; E5 retract"), None);
        assert_eq!(first_number_after('E', "G1 E2 ; E5"), Some(2.0));
    }

    #[test]
    fn test_first_number_after_ignores_letter_runs() {
        // The E inside a word must not match
        assert_eq!(first_number_after('E', "MESH1"), None);
    }

    #[test]
    fn test_replace_number_after_preserves_tokens() {
        assert_eq!(
            replace_number_after('E', "G1 X10 E2.5 F1800", 5.0),
            "G1 X10 E5 F1800"
        );
    }

    #[test]
    fn test_replace_number_after_preserves_comment() {
        assert_eq!(
            replace_number_after('E', "G1 E2.5 ; perimeter", 3.75),
            "G1 E3.75 ; perimeter"
        );
    }

    #[test]
    fn test_replace_number_after_absent_field() {
        assert_eq!(replace_number_after('E', "G1 X10 Y20", 5.0), "G1 X10 Y20");
    }

    #[test]
    fn test_format_field_value_trims_zeros() {
        assert_eq!(format_field_value(20.0), "20");
        assert_eq!(format_field_value(2.5), "2.5");
        assert_eq!(format_field_value(0.123456), "0.12346");
        assert_eq!(format_field_value(-1.10), "-1.1");
    }
}
