//! Documentation detector — skeleton. Doc-comment density conventions are
//! covered by declarative patterns rather than hand-written AST logic.

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::PatternMatch;
use crate::engine::visitor::DetectionContext;

pub struct DocumentationDetector;

impl Detector for DocumentationDetector {
    fn id(&self) -> &str { "documentation-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Documentation }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Declarative }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, _ctx: &DetectionContext) -> Vec<PatternMatch> {
        Vec::new()
    }
}
