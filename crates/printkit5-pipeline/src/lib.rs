//! # PrintKit5 Pipeline
//!
//! The G-code streaming pipeline: a chain of composable line-transforming
//! stages between a command source (sliced file or interactive queue) and
//! the printer's serial transport. Each stage pulls one line at a time
//! from the stage beneath it, optionally rewrites or suppresses it while
//! maintaining private running state, and hands it upward.
//!
//! - [`stream`] — the stage contract and the line sources
//! - [`proxy`] — default-forwarding plumbing every filter mounts into
//! - [`filters`] — the concrete filter family
//! - [`queued`] — side-channel command injection
//! - [`pipeline`] — config-driven assembly and the shared handles

pub mod filters;
pub mod pipeline;
pub mod proxy;
pub mod queued;
pub mod stream;

pub use filters::{BabyStepOffsetFilter, ExtrusionMultiplierFilter, FeedRateMultiplierFilter};
pub use pipeline::{FilterKind, Pipeline, PipelineBuilder, PipelineConfig, PipelineHandles};
pub use proxy::{FilterAction, LineFilter, StreamProxy};
pub use queued::{CommandQueue, QueuedCommandStream};
pub use stream::{BoxedStream, FileLineSource, GcodeStream, StringLineSource, VecLineSource};
