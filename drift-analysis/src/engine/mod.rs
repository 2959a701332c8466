//! The per-file analysis engine: AST-visitor detection, string extraction,
//! regex matching, resolution indexing, and the optional GAST normalization
//! pass, composed by [`pipeline::AnalysisPipeline`] and driven across a
//! whole tree by [`orchestrator`].

pub mod gast;
pub mod incremental;
pub mod orchestrator;
pub mod pipeline;
pub mod regex_engine;
pub mod resolution;
pub mod string_extraction;
pub mod types;
pub mod visitor;

pub use incremental::IncrementalAnalyzer;
pub use orchestrator::{analyze, analyze_changed, AnalyzeResult};
pub use pipeline::AnalysisPipeline;
pub use regex_engine::{RegexEngine, RegexPattern};
pub use resolution::{ResolutionEntry, ResolutionIndex, ResolutionStrategy, SymbolKind};
pub use types::{AnalysisPhase, AnalysisResult, DetectionMethod, PatternCategory, PatternMatch};
pub use visitor::{
    DetectionContext, DetectionEngine, DetectorHandler, FileDetectorHandler,
    LearningDetectorHandler, VisitorRegistry,
};
