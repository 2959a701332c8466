//! Detector trait: the common interface every category detector implements.

use crate::engine::types::{PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

/// Detector categories are exactly the pattern categories they emit.
pub type DetectorCategory = PatternCategory;

/// How a detector produces its matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorVariant {
    /// Hand-written AST-visitor logic, one per category.
    Base,
    /// Matches come from declarative TOML patterns compiled elsewhere
    /// (`patterns::pipeline`); the detector exists for registry accounting.
    Declarative,
    /// Emitted from convention deviation rather than a fixed rule.
    Learned,
}

/// A category detector: inspects one file's `DetectionContext` and emits matches.
pub trait Detector: Send + Sync {
    fn id(&self) -> &str;
    fn category(&self) -> DetectorCategory;
    fn variant(&self) -> DetectorVariant;
    /// Critical detectors still run under `critical_only` mode.
    fn is_critical(&self) -> bool;
    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch>;
}
