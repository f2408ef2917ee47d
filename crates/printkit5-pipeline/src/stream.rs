//! Stream stage contract and line sources
//!
//! The pipeline is a singly linked ownership chain: the transport pulls
//! from the outermost stage, each stage pulls from the stage it owns, and
//! the innermost stage wraps the line source. Control flows pull-wise and
//! lazily; one `next_line` call advances the stream by exactly one line.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One stage in the streaming chain.
///
/// `next_line` must be synchronous and must never block on unrelated I/O;
/// waiting for printer acknowledgments belongs to the transport, not to a
/// stage. `None` means end of stream and is the normal termination signal
/// (also how whole-stream cancellation surfaces); every stage propagates
/// it immediately without further parsing.
pub trait GcodeStream: Send {
    /// Pull the next line to send, or `None` at end of stream.
    fn next_line(&mut self) -> Option<String>;

    /// Human-readable snapshot of this stage's internal state for
    /// diagnostics. Must not mutate state and is never part of the send
    /// loop.
    fn debug_state(&self) -> String {
        String::new()
    }
}

/// Boxed stage for runtime composition.
pub type BoxedStream = Box<dyn GcodeStream>;

impl<S: GcodeStream + ?Sized> GcodeStream for Box<S> {
    fn next_line(&mut self) -> Option<String> {
        (**self).next_line()
    }

    fn debug_state(&self) -> String {
        (**self).debug_state()
    }
}

/// Innermost stage over an in-memory block of G-code text.
pub struct StringLineSource {
    lines: VecDeque<String>,
}

impl StringLineSource {
    /// Split `text` into lines, dropping line terminators but nothing
    /// else: lines reach the filters untrimmed and untransformed.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

impl GcodeStream for StringLineSource {
    fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    fn debug_state(&self) -> String {
        format!("string_source: {} lines remaining", self.lines.len())
    }
}

/// Innermost stage over a prepared command list.
pub struct VecLineSource {
    lines: VecDeque<String>,
}

impl VecLineSource {
    /// Create a source from already-separated command lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into(),
        }
    }
}

impl GcodeStream for VecLineSource {
    fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    fn debug_state(&self) -> String {
        format!("vec_source: {} lines remaining", self.lines.len())
    }
}

/// Innermost stage over a G-code file on disk.
///
/// Reads lazily through a buffered reader. A read error mid-file is
/// logged and treated as end of stream; the stage contract has no error
/// channel and a halted source must look like normal termination.
pub struct FileLineSource {
    reader: BufReader<File>,
    line_number: u64,
}

impl FileLineSource {
    /// Open `path` for streaming.
    pub fn open(path: impl AsRef<Path>) -> printkit5_core::Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self {
            reader: BufReader::new(file),
            line_number: 0,
        })
    }
}

impl GcodeStream for FileLineSource {
    fn next_line(&mut self) -> Option<String> {
        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                while buf.ends_with('\n') || buf.ends_with('\r') {
                    buf.pop();
                }
                Some(buf)
            }
            Err(e) => {
                tracing::error!(line = self.line_number, "file source read failed: {}", e);
                None
            }
        }
    }

    fn debug_state(&self) -> String {
        format!("file_source: {} lines read", self.line_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_source_preserves_lines_verbatim() {
        let mut source = StringLineSource::new("G1 X10  E2.5\nM106 S255\n\nG92 E0");
        assert_eq!(source.next_line().as_deref(), Some("G1 X10  E2.5"));
        assert_eq!(source.next_line().as_deref(), Some("M106 S255"));
        assert_eq!(source.next_line().as_deref(), Some(""));
        assert_eq!(source.next_line().as_deref(), Some("G92 E0"));
        assert_eq!(source.next_line(), None);
        // End of stream is stable across repeated pulls
        assert_eq!(source.next_line(), None);
    }

    #[test]
    fn test_vec_source_order() {
        let mut source = VecLineSource::new(vec!["G28".into(), "G1 E1".into()]);
        assert_eq!(source.next_line().as_deref(), Some("G28"));
        assert_eq!(source.next_line().as_deref(), Some("G1 E1"));
        assert_eq!(source.next_line(), None);
    }
}
