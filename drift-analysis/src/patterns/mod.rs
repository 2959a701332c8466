//! Pattern intelligence: aggregation, Bayesian confidence scoring, outlier
//! detection, and convention learning, chained by `PatternIntelligencePipeline`.

pub mod aggregation;
pub mod confidence;
pub mod learning;
pub mod outliers;
pub mod pipeline;

pub use pipeline::{PatternIntelligencePipeline, PipelineResult};
