//! Config detector — environment-variable access conventions.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ConfigDetector;

impl Detector for ConfigDetector {
    fn id(&self) -> &str { "config-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Config }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for call in ctx.call_sites {
            if matches!(call.callee_name.as_str(), "getenv" | "environ" | "Getenv") {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "CONFIG-ENV-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Config,
                    matched_text: format!("{}() — environment variable access", call.callee_name),
                });
            }
        }
        matches
    }
}
