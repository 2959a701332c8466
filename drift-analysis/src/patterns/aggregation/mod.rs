//! Pattern aggregation — collapses raw per-file pattern matches into
//! project-level aggregated patterns with merge-candidate detection.

pub mod pipeline;
pub mod types;

pub use pipeline::{AggregationPipeline, AggregationResult};
pub use types::{
    AggregatedPattern, AggregationConfig, MergeCandidate, MergeDecision, PatternHierarchy,
    PatternLocation,
};
