//! Concrete filter implementations
//!
//! Each filter follows the same template: classify cheaply, parse at most
//! a couple of numeric fields, rewrite one field or leave the line alone,
//! update private state. Lines outside a filter's concern pass through
//! byte-identical.

pub mod baby_step_offset;
pub mod extrusion_multiplier;
pub mod feed_rate_multiplier;

pub use baby_step_offset::BabyStepOffsetFilter;
pub use extrusion_multiplier::ExtrusionMultiplierFilter;
pub use feed_rate_multiplier::FeedRateMultiplierFilter;
