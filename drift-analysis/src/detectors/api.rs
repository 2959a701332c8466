//! API detector — HTTP route declaration conventions.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ApiDetector;

impl Detector for ApiDetector {
    fn id(&self) -> &str { "api-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Api }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for func in ctx.functions {
            for dec in &func.decorators {
                if matches!(dec.name.as_str(), "Get" | "Post" | "Put" | "Delete" | "Patch" | "Route" | "RequestMapping") {
                    matches.push(PatternMatch {
                        file: ctx.file.to_string(),
                        line: dec.range.start.line,
                        column: dec.range.start.column,
                        pattern_id: "API-ROUTE-001".to_string(),
                        confidence: 0.65,
                        cwe_ids: SmallVec::new(),
                        owasp: None,
                        detection_method: DetectionMethod::AstVisitor,
                        category: PatternCategory::Api,
                        matched_text: format!("@{} route declaration", dec.name),
                    });
                }
            }
        }
        matches
    }
}
