//! Errors detector — generic exception types and vague error handling.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ErrorsDetector;

impl Detector for ErrorsDetector {
    fn id(&self) -> &str { "errors-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Errors }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for call in ctx.call_sites {
            if matches!(
                call.callee_name.as_str(),
                "Exception" | "RuntimeException" | "StandardError" | "generic_exception"
            ) {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "ERR-GENERIC-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::from_buf([0, 0]),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Errors,
                    matched_text: format!("{}() — overly generic exception type", call.callee_name),
                });
            }
        }

        matches
    }
}
