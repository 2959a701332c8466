//! Testing detector — test-function naming and assertion-library conventions.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct TestingDetector;

impl Detector for TestingDetector {
    fn id(&self) -> &str { "testing-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Testing }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { false }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for func in ctx.functions {
            let is_test_fn = func.name.starts_with("test_")
                || func.name.starts_with("Test")
                || func.decorators.iter().any(|d| d.name == "test" || d.name == "Test" || d.name == "pytest.fixture");
            if is_test_fn {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: func.column,
                    pattern_id: "TEST-NAMING-001".to_string(),
                    confidence: 0.60,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Testing,
                    matched_text: format!("{} — test function naming", func.name),
                });
            }
        }

        for call in ctx.call_sites {
            if matches!(
                call.callee_name.as_str(),
                "assert" | "assertEqual" | "assert_eq" | "expect" | "should" | "Assert"
            ) {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "TEST-ASSERT-001".to_string(),
                    confidence: 0.50,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Testing,
                    matched_text: format!("{}() — assertion style", call.callee_name),
                });
            }
        }

        matches
    }
}
