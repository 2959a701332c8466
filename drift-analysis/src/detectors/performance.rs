//! Performance detector — skeleton. Hot-path anti-patterns (nested-loop
//! complexity, N+1 query shapes) need data-flow context beyond a single
//! visitor pass and are covered by declarative patterns instead.

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::PatternMatch;
use crate::engine::visitor::DetectionContext;

pub struct PerformanceDetector;

impl Detector for PerformanceDetector {
    fn id(&self) -> &str { "performance-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Performance }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Declarative }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, _ctx: &DetectionContext) -> Vec<PatternMatch> {
        Vec::new()
    }
}
