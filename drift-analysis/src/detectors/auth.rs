//! Auth detector — authorization-guard decorator conventions.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct AuthDetector;

impl Detector for AuthDetector {
    fn id(&self) -> &str { "auth-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Auth }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { true }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for func in ctx.functions {
            for dec in &func.decorators {
                if matches!(dec.name.as_str(), "RequiresAuth" | "Authorize" | "login_required" | "IsAuthenticated" | "UseGuards") {
                    matches.push(PatternMatch {
                        file: ctx.file.to_string(),
                        line: dec.range.start.line,
                        column: dec.range.start.column,
                        pattern_id: "AUTH-GUARD-001".to_string(),
                        confidence: 0.65,
                        cwe_ids: SmallVec::new(),
                        owasp: None,
                        detection_method: DetectionMethod::AstVisitor,
                        category: PatternCategory::Auth,
                        matched_text: format!("@{} authorization guard", dec.name),
                    });
                }
            }
        }
        matches
    }
}
