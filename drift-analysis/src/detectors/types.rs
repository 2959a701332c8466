//! Types detector — parameter type-annotation presence convention signal.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct TypesDetector;

impl Detector for TypesDetector {
    fn id(&self) -> &str { "types-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Types }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for func in ctx.functions {
            if func.parameters.is_empty() {
                continue;
            }
            let annotated = func.parameters.iter().filter(|p| p.type_annotation.is_some()).count();
            let value = if annotated == func.parameters.len() { "annotated" } else { "unannotated" };
            matches.push(PatternMatch {
                file: ctx.file.to_string(),
                line: func.line,
                column: func.column,
                pattern_id: format!("TYPES-PARAMS-{value}"),
                confidence: 0.50,
                cwe_ids: SmallVec::new(),
                owasp: None,
                detection_method: DetectionMethod::AstVisitor,
                category: PatternCategory::Types,
                matched_text: format!("{} — parameters {value}", func.name),
            });
        }
        matches
    }
}
