//! Logging detector — logger-call conventions.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct LoggingDetector;

impl Detector for LoggingDetector {
    fn id(&self) -> &str { "logging-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Logging }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for call in ctx.call_sites {
            let is_console = call.receiver.as_deref() == Some("console") || call.receiver.as_deref() == Some("System.out");
            let is_structured = call.receiver.as_deref().map(|r| r.contains("logger") || r.contains("log")).unwrap_or(false);
            if is_console {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "LOG-CONSOLE-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Logging,
                    matched_text: "console logging instead of structured logger".to_string(),
                });
            } else if is_structured {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "LOG-STRUCTURED-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Logging,
                    matched_text: "structured logger call".to_string(),
                });
            }
        }
        matches
    }
}
