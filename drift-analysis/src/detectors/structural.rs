//! Structural detector — oversized classes and functions.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

const GOD_CLASS_METHOD_THRESHOLD: usize = 20;
const LONG_FUNCTION_LINE_THRESHOLD: u32 = 100;

pub struct StructuralDetector;

impl Detector for StructuralDetector {
    fn id(&self) -> &str { "structural-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Structural }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for class in ctx.classes {
            if class.methods.len() > GOD_CLASS_METHOD_THRESHOLD {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: class.range.start.line,
                    column: class.range.start.column,
                    pattern_id: "STRUCT-GODCLASS-001".to_string(),
                    confidence: 0.60,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Structural,
                    matched_text: format!("{} — {} methods", class.name, class.methods.len()),
                });
            }
        }

        for func in ctx.functions {
            let span = func.end_line.saturating_sub(func.line);
            if span > LONG_FUNCTION_LINE_THRESHOLD {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: func.column,
                    pattern_id: "STRUCT-LONGFN-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Structural,
                    matched_text: format!("{} — {} lines", func.name, span),
                });
            }
        }

        matches
    }
}
