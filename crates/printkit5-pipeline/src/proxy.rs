//! Default-forwarding stage plumbing
//!
//! Concrete filters never implement the stage contract directly. They
//! implement [`LineFilter`] — one hook for the behavior they care about —
//! and are mounted in a [`StreamProxy`], which owns the inner stage and
//! supplies everything a well-behaved stage must do identically:
//! end-of-stream propagation, the pass-through short-circuit, one-shot
//! line classification, and buffering for synthetic lines. Layering many
//! independently authored filters then composes without any of them
//! re-implementing the plumbing.

use printkit5_core::gcode::{classify, LineClass};
use std::collections::VecDeque;

use crate::stream::{BoxedStream, GcodeStream};

/// What a filter decided to do with one pulled line.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    /// Forward this line, original or rewritten.
    Send(String),
    /// Forward these lines in place of the original, in order. Used for
    /// synthetic emission (a correction command before the original, or
    /// an expansion of it).
    SendAll(Vec<String>),
    /// Suppress the line; the proxy pulls the next one from below.
    Drop,
}

/// Per-concern transformation hook.
///
/// A filter sees only lines that survived the pass-through check, already
/// classified. The contract every filter must uphold: a line outside its
/// concern is forwarded byte-identical, and state updates happen only as
/// a side effect of lines it explicitly recognizes. No anomaly is an
/// error — a malformed field degrades to forwarding unchanged, because a
/// garbled line must never stall motion control.
pub trait LineFilter: Send {
    /// Short identifier used in diagnostics and logs.
    fn name(&self) -> &str;

    /// Decide what to do with one line.
    fn process(&mut self, class: LineClass, line: String) -> FilterAction;

    /// Snapshot of the filter's private state for diagnostics.
    fn debug_state(&self) -> String {
        String::new()
    }
}

/// A stage that wraps exactly one inner stage and mounts one filter.
///
/// Everything not overridden by the filter delegates unchanged to the
/// inner stage.
pub struct StreamProxy<F: LineFilter> {
    filter: F,
    inner: BoxedStream,
    pending: VecDeque<String>,
}

impl<F: LineFilter> StreamProxy<F> {
    /// Mount `filter` over `inner`.
    pub fn new(filter: F, inner: BoxedStream) -> Self {
        Self {
            filter,
            inner,
            pending: VecDeque::new(),
        }
    }

    /// Box this stage for chaining.
    pub fn boxed(self) -> BoxedStream
    where
        F: 'static,
    {
        Box::new(self)
    }
}

impl<F: LineFilter> GcodeStream for StreamProxy<F> {
    fn next_line(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }

            let line = self.inner.next_line()?;
            let class = classify(&line);

            // The sentinel short-circuits before any filter parsing.
            if class == LineClass::PassThrough {
                return Some(line);
            }

            match self.filter.process(class, line) {
                FilterAction::Send(line) => return Some(line),
                FilterAction::SendAll(lines) => self.pending.extend(lines),
                FilterAction::Drop => {}
            }
        }
    }

    fn debug_state(&self) -> String {
        let own = self.filter.debug_state();
        let below = self.inner.debug_state();
        match (own.is_empty(), below.is_empty()) {
            (true, true) => self.filter.name().to_string(),
            (true, false) => format!("{} | {}", self.filter.name(), below),
            (false, true) => format!("{}: {}", self.filter.name(), own),
            (false, false) => format!("{}: {} | {}", self.filter.name(), own, below),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::VecLineSource;

    /// Forwards everything and counts lines seen, for plumbing tests.
    struct CountingFilter {
        seen: usize,
    }

    impl LineFilter for CountingFilter {
        fn name(&self) -> &str {
            "counting"
        }

        fn process(&mut self, _class: LineClass, line: String) -> FilterAction {
            self.seen += 1;
            FilterAction::Send(line)
        }

        fn debug_state(&self) -> String {
            format!("seen = {}", self.seen)
        }
    }

    /// Drops fan commands, expands homing into two lines.
    struct RewritingFilter;

    impl LineFilter for RewritingFilter {
        fn name(&self) -> &str {
            "rewriting"
        }

        fn process(&mut self, _class: LineClass, line: String) -> FilterAction {
            if line.starts_with("M106") {
                FilterAction::Drop
            } else if line == "G28" {
                FilterAction::SendAll(vec!["G28 X".to_string(), "G28 Y".to_string()])
            } else {
                FilterAction::Send(line)
            }
        }
    }

    fn source(lines: &[&str]) -> BoxedStream {
        Box::new(VecLineSource::new(
            lines.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn test_proxy_propagates_end_of_stream() {
        let mut proxy = StreamProxy::new(CountingFilter { seen: 0 }, source(&[]));
        assert_eq!(proxy.next_line(), None);
        assert_eq!(proxy.next_line(), None);
    }

    #[test]
    fn test_proxy_short_circuits_pass_through() {
        let mut proxy = StreamProxy::new(
            CountingFilter { seen: 0 },
            source(&["M106 S255 ; NO_PROCESSING", "G1 E1"]),
        );
        assert_eq!(
            proxy.next_line().as_deref(),
            Some("M106 S255 ; NO_PROCESSING")
        );
        assert_eq!(proxy.next_line().as_deref(), Some("G1 E1"));
        // The sentinel line never reached the filter
        assert!(proxy.debug_state().contains("seen = 1"));
    }

    #[test]
    fn test_proxy_drop_pulls_next_line() {
        let mut proxy = StreamProxy::new(RewritingFilter, source(&["M106 S255", "G1 X1"]));
        assert_eq!(proxy.next_line().as_deref(), Some("G1 X1"));
        assert_eq!(proxy.next_line(), None);
    }

    #[test]
    fn test_proxy_send_all_preserves_order() {
        let mut proxy = StreamProxy::new(RewritingFilter, source(&["G28", "G1 X1"]));
        assert_eq!(proxy.next_line().as_deref(), Some("G28 X"));
        assert_eq!(proxy.next_line().as_deref(), Some("G28 Y"));
        assert_eq!(proxy.next_line().as_deref(), Some("G1 X1"));
        assert_eq!(proxy.next_line(), None);
    }

    #[test]
    fn test_debug_state_aggregates_down_the_chain() {
        let inner = StreamProxy::new(CountingFilter { seen: 0 }, source(&[])).boxed();
        let outer = StreamProxy::new(RewritingFilter, inner);
        let state = outer.debug_state();
        assert!(state.contains("rewriting"));
        assert!(state.contains("counting"));
    }
}
