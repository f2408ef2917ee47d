//! Side-channel command injection
//!
//! Interactive commands (a manual retract, a temperature request, a pause
//! macro) arrive from outside the streaming thread while a print is
//! running. They are pushed onto a shared [`CommandQueue`] and drained by
//! a [`QueuedCommandStream`] stage, which emits them ahead of the next
//! line pulled from the stage below. Where the stage sits in the chain
//! decides which filters still apply to injected lines — a deployment
//! choice, not part of this contract.

use printkit5_core::types::{thread_safe_deque, ThreadSafeDeque};

use crate::stream::{BoxedStream, GcodeStream};

/// Cloneable handle for enqueuing lines from any thread.
#[derive(Clone)]
pub struct CommandQueue {
    lines: ThreadSafeDeque<String>,
}

impl CommandQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            lines: thread_safe_deque(),
        }
    }

    /// Enqueue one line for injection ahead of the file stream.
    pub fn push(&self, line: impl Into<String>) {
        self.lines.lock().push_back(line.into());
    }

    /// Dequeue the oldest pending line.
    pub fn pop(&self) -> Option<String> {
        self.lines.lock().pop_front()
    }

    /// Number of lines waiting for injection.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether no lines are waiting.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Stage that drains the shared queue before pulling from below.
///
/// Implements the stage contract directly rather than through a
/// [`crate::proxy::StreamProxy`], because its concern is emission, not
/// transformation: injected lines are returned as pushed, and lines from
/// below pass through untouched.
pub struct QueuedCommandStream {
    queue: CommandQueue,
    inner: BoxedStream,
}

impl QueuedCommandStream {
    /// Mount the injection stage over `inner`, draining `queue`.
    pub fn new(queue: CommandQueue, inner: BoxedStream) -> Self {
        Self { queue, inner }
    }

    /// Box this stage for chaining.
    pub fn boxed(self) -> BoxedStream {
        Box::new(self)
    }
}

impl GcodeStream for QueuedCommandStream {
    fn next_line(&mut self) -> Option<String> {
        if let Some(line) = self.queue.pop() {
            tracing::trace!(%line, "injecting queued command");
            return Some(line);
        }
        self.inner.next_line()
    }

    fn debug_state(&self) -> String {
        let below = self.inner.debug_state();
        if below.is_empty() {
            format!("queued_commands: {} pending", self.queue.len())
        } else {
            format!("queued_commands: {} pending | {}", self.queue.len(), below)
        }
    }
}
