//! Data-access detector — raw SQL execution and ORM bypass patterns.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct DataAccessDetector;

impl Detector for DataAccessDetector {
    fn id(&self) -> &str { "data-access-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::DataAccess }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { true }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for call in ctx.call_sites {
            if matches!(
                call.callee_name.as_str(),
                "query" | "execute" | "exec" | "raw" | "executeQuery" | "executeUpdate"
                    | "rawQuery" | "unsafe" | "fromRaw"
            ) {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "DATA-RAWSQL-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::from_buf([89, 0]),
                    owasp: Some("A03:2021".to_string()),
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::DataAccess,
                    matched_text: format!("{}() — raw query execution", call.callee_name),
                });
            }
        }

        for lit in &ctx.parse_result.string_literals {
            let upper = lit.value.to_uppercase();
            if lit.value.len() > 10
                && (upper.starts_with("SELECT ")
                    || upper.starts_with("INSERT ")
                    || upper.starts_with("UPDATE ")
                    || upper.starts_with("DELETE FROM"))
            {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: lit.line,
                    column: lit.column,
                    pattern_id: "DATA-INLINESQL-001".to_string(),
                    confidence: 0.60,
                    cwe_ids: SmallVec::from_buf([89, 0]),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::DataAccess,
                    matched_text: "inline SQL literal".to_string(),
                });
            }
        }

        matches
    }
}
