//! Styling detector — function-naming convention signal (camelCase vs
//! snake_case), feeding convention learning rather than flagging a defect.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct StylingDetector;

impl Detector for StylingDetector {
    fn id(&self) -> &str { "styling-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Styling }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for func in ctx.functions {
            let style = naming_style(&func.name);
            if let Some(style) = style {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: func.column,
                    pattern_id: format!("STYLE-NAMING-{style}"),
                    confidence: 0.50,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Styling,
                    matched_text: format!("{} — {} naming", func.name, style),
                });
            }
        }
        matches
    }
}

fn naming_style(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return None;
    }
    if name.contains('_') && name.chars().all(|c| c.is_lowercase() || c == '_' || c.is_numeric()) {
        Some("snake_case")
    } else if name.chars().next().map(|c| c.is_lowercase()).unwrap_or(false)
        && name.chars().any(|c| c.is_uppercase())
    {
        Some("camelCase")
    } else {
        None
    }
}
