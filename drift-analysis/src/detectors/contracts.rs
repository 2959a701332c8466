//! Contracts detector — skeleton. Operation discovery and breaking-change
//! detection for API contracts lives in the `contracts` engine; this
//! detector exists only for category-registry accounting.

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::PatternMatch;
use crate::engine::visitor::DetectionContext;

pub struct ContractsDetector;

impl Detector for ContractsDetector {
    fn id(&self) -> &str { "contracts-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Api }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Declarative }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, _ctx: &DetectionContext) -> Vec<PatternMatch> {
        Vec::new()
    }
}
