//! Components detector — skeleton. Frontend component conventions are
//! covered by declarative patterns compiled into `patterns::pipeline`
//! rather than hand-written AST logic.

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::PatternMatch;
use crate::engine::visitor::DetectionContext;

pub struct ComponentsDetector;

impl Detector for ComponentsDetector {
    fn id(&self) -> &str { "components-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Components }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Declarative }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, _ctx: &DetectionContext) -> Vec<PatternMatch> {
        Vec::new()
    }
}
