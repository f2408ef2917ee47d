//! Pipeline assembly
//!
//! Builds the ordered chain of stages around a line source. Which filters
//! a deployment wires in, and in what order, is configuration — the chain
//! must behave correctly for any ordering — so assembly is driven by a
//! serde-backed [`PipelineConfig`] in addition to the programmatic
//! builder. The shared handles for every live-adjustable scalar and the
//! injection queue are created here and stay available on the built
//! [`Pipeline`] for the UI/diagnostics side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use printkit5_core::error::{PipelineError, Result};
use printkit5_core::types::ValueHandle;

use crate::filters::{BabyStepOffsetFilter, ExtrusionMultiplierFilter, FeedRateMultiplierFilter};
use crate::proxy::StreamProxy;
use crate::queued::{CommandQueue, QueuedCommandStream};
use crate::stream::{BoxedStream, GcodeStream};

/// The filters the assembler knows how to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Delta-based extrusion compensation
    ExtrusionMultiplier,
    /// Absolute feed rate scaling
    FeedRateMultiplier,
    /// Live Z nudging
    BabyStepOffset,
    /// Side-channel command injection
    QueuedCommands,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtrusionMultiplier => write!(f, "extrusion_multiplier"),
            Self::FeedRateMultiplier => write!(f, "feed_rate_multiplier"),
            Self::BabyStepOffset => write!(f, "baby_step_offset"),
            Self::QueuedCommands => write!(f, "queued_commands"),
        }
    }
}

impl FromStr for FilterKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "extrusion_multiplier" => Ok(Self::ExtrusionMultiplier),
            "feed_rate_multiplier" => Ok(Self::FeedRateMultiplier),
            "baby_step_offset" => Ok(Self::BabyStepOffset),
            "queued_commands" => Ok(Self::QueuedCommands),
            _ => Err(PipelineError::UnknownFilter {
                name: s.to_string(),
            }),
        }
    }
}

/// Declarative chain description, innermost filter first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Filters to layer over the source, in wrapping order.
    pub filters: Vec<FilterKind>,
}

impl PipelineConfig {
    /// The chain a stock deployment uses: injection closest to the
    /// source so interactive commands receive the same corrections as
    /// file lines.
    pub fn standard() -> Self {
        Self {
            filters: vec![
                FilterKind::QueuedCommands,
                FilterKind::ExtrusionMultiplier,
                FilterKind::FeedRateMultiplier,
                FilterKind::BabyStepOffset,
            ],
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            PipelineError::InvalidConfig {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PipelineError::InvalidConfig {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Shared handles created at assembly, held by the observer side.
///
/// All handles are cloneable and thread-safe; reading or setting them
/// never delays the thread pulling lines.
#[derive(Clone)]
pub struct PipelineHandles {
    /// Extrusion compensation ratio (1.0 = no compensation).
    pub extrusion_ratio: ValueHandle,
    /// Feed rate ratio (1.0 = as sliced).
    pub feed_rate_ratio: ValueHandle,
    /// Baby-step Z offset in millimeters.
    pub baby_step_offset: ValueHandle,
    /// Queue for injecting interactive commands.
    pub command_queue: CommandQueue,
}

impl PipelineHandles {
    /// Handles with neutral initial values.
    pub fn new() -> Self {
        Self {
            extrusion_ratio: ValueHandle::new(1.0),
            feed_rate_ratio: ValueHandle::new(1.0),
            baby_step_offset: ValueHandle::new(0.0),
            command_queue: CommandQueue::new(),
        }
    }
}

impl Default for PipelineHandles {
    fn default() -> Self {
        Self::new()
    }
}

/// Layers stages over a source, innermost first.
pub struct PipelineBuilder {
    stream: BoxedStream,
    handles: PipelineHandles,
}

impl PipelineBuilder {
    /// Start a chain over `source` with fresh neutral handles.
    pub fn new(source: BoxedStream) -> Self {
        Self {
            stream: source,
            handles: PipelineHandles::new(),
        }
    }

    /// Start a chain over `source` reusing existing handles, e.g. to
    /// keep user-set ratios across consecutive jobs.
    pub fn with_handles(source: BoxedStream, handles: PipelineHandles) -> Self {
        Self {
            stream: source,
            handles,
        }
    }

    /// Assemble a chain from a configuration.
    pub fn from_config(config: &PipelineConfig, source: BoxedStream) -> Self {
        config
            .filters
            .iter()
            .fold(Self::new(source), |builder, kind| builder.add(*kind))
    }

    /// The handles wired into the filters added so far.
    pub fn handles(&self) -> &PipelineHandles {
        &self.handles
    }

    /// Wrap the current chain in one more built-in filter.
    pub fn add(mut self, kind: FilterKind) -> Self {
        tracing::info!(filter = %kind, "layering pipeline stage");
        self.stream = match kind {
            FilterKind::ExtrusionMultiplier => StreamProxy::new(
                ExtrusionMultiplierFilter::new(self.handles.extrusion_ratio.clone()),
                self.stream,
            )
            .boxed(),
            FilterKind::FeedRateMultiplier => StreamProxy::new(
                FeedRateMultiplierFilter::new(self.handles.feed_rate_ratio.clone()),
                self.stream,
            )
            .boxed(),
            FilterKind::BabyStepOffset => StreamProxy::new(
                BabyStepOffsetFilter::new(self.handles.baby_step_offset.clone()),
                self.stream,
            )
            .boxed(),
            FilterKind::QueuedCommands => {
                QueuedCommandStream::new(self.handles.command_queue.clone(), self.stream).boxed()
            }
        };
        self
    }

    /// Wrap the current chain in a caller-supplied stage, for filters
    /// not known to the assembler.
    pub fn add_stage(mut self, wrap: impl FnOnce(BoxedStream) -> BoxedStream) -> Self {
        self.stream = wrap(self.stream);
        self
    }

    /// Finish the chain.
    pub fn build(self) -> Pipeline {
        Pipeline {
            stream: self.stream,
            handles: self.handles,
        }
    }
}

/// The assembled chain: the outermost stage plus the shared handles.
///
/// The transport drives it like any other stage; state handles stay
/// available for live adjustment until the job ends and the pipeline is
/// dropped.
pub struct Pipeline {
    stream: BoxedStream,
    handles: PipelineHandles,
}

impl Pipeline {
    /// The shared handles for live adjustment and diagnostics.
    pub fn handles(&self) -> &PipelineHandles {
        &self.handles
    }
}

impl GcodeStream for Pipeline {
    fn next_line(&mut self) -> Option<String> {
        self.stream.next_line()
    }

    fn debug_state(&self) -> String {
        self.stream.debug_state()
    }
}
