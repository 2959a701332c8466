//! Accessibility detector — skeleton. ARIA/alt-text conventions require
//! JSX/template attribute extraction not carried by `ParseResult` and are
//! covered by declarative patterns instead.

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::PatternMatch;
use crate::engine::visitor::DetectionContext;

pub struct AccessibilityDetector;

impl Detector for AccessibilityDetector {
    fn id(&self) -> &str { "accessibility-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Accessibility }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Declarative }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, _ctx: &DetectionContext) -> Vec<PatternMatch> {
        Vec::new()
    }
}
