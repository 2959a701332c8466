//! Rules evaluator — maps learned conventions and flagged patterns to violations.

use std::collections::HashMap;

use super::types::{
    ConventionContext, EvaluationResult, InconsistencyFinding, OutlierLocation, PatternInfo,
    RulesInput, Severity, Violation,
};
use crate::patterns::learning::types::ConventionCategory;

/// Maps detected patterns and their outlier locations to severity-ranked
/// violations, deriving severity from a learned convention's category when
/// the pattern is convention-backed, or from its CWE/category table otherwise.
pub struct RulesEvaluator {
    /// FP rates per pattern_id (0.0-1.0). Above 0.20, severity is downgraded
    /// one level before deduplication.
    fp_rates: HashMap<String, f64>,
}

impl RulesEvaluator {
    pub fn new() -> Self {
        Self { fp_rates: HashMap::new() }
    }

    /// Set FP rates per pattern_id for severity adjustment.
    pub fn with_fp_rates(mut self, fp_rates: HashMap<String, f64>) -> Self {
        self.fp_rates = fp_rates;
        self
    }

    /// Evaluate all patterns and produce violations plus contested-convention
    /// inconsistency findings.
    pub fn evaluate(&self, input: &RulesInput) -> EvaluationResult {
        let mut result = EvaluationResult::default();

        for pattern in &input.patterns {
            if let Some(conv) = &pattern.convention {
                if conv.category == ConventionCategory::Contested {
                    result.inconsistencies.extend(
                        pattern
                            .outliers
                            .iter()
                            .map(|o| contested_finding(pattern, o)),
                    );
                    continue;
                }
            }

            for outlier in &pattern.outliers {
                let Some(mut severity) = self.assign_severity(pattern) else { continue };
                if let Some(&fp_rate) = self.fp_rates.get(&pattern.pattern_id) {
                    if fp_rate > 0.20 {
                        severity = downgrade_severity(severity);
                    }
                }

                let rule_id = format!("{}/{}", pattern.category, pattern.pattern_id);
                let id = format!("{}-{}-{}", rule_id, outlier.file, outlier.line);
                let violation_key = format!("{}:{}:{}", outlier.file, outlier.line, rule_id);
                let is_new = !input.baseline_violation_ids.is_empty()
                    && !input.baseline_violation_ids.contains(&violation_key);

                result.violations.push(build_violation(
                    id,
                    rule_id,
                    pattern,
                    outlier,
                    severity,
                    is_new,
                ));
            }
        }

        self.deduplicate(&mut result.violations);
        result
    }

    /// Severity of a pattern's violations. `None` means skip (contested
    /// conventions are handled separately in `evaluate`).
    fn assign_severity(&self, pattern: &PatternInfo) -> Option<Severity> {
        if let Some(conv) = &pattern.convention {
            return Some(match conv.category {
                ConventionCategory::Universal => Severity::Error,
                ConventionCategory::ProjectSpecific => Severity::Warning,
                ConventionCategory::Emerging => Severity::Info,
                ConventionCategory::Legacy => Severity::Hint,
                ConventionCategory::Contested => return None,
            });
        }

        if let Some(&cwe) = pattern.cwe_ids.first() {
            return Some(match cwe {
                // SQL injection, XSS, OS command injection, path traversal,
                // code injection, deserialization, XXE, SSRF, weak crypto,
                // hardcoded credentials.
                89 | 79 | 78 | 22 | 94 | 502 | 611 | 918 | 327 | 798 => Severity::Error,
                _ => Severity::Warning,
            });
        }

        match pattern.category.as_str() {
            "security" | "crypto" => Some(Severity::Error),
            "errors" | "auth" => Some(Severity::Warning),
            "documentation" => Some(Severity::Info),
            _ => Some(Severity::Info),
        }
    }

    /// Same file+line+rule_id from multiple detectors collapses to the
    /// highest severity.
    fn deduplicate(&self, violations: &mut Vec<Violation>) {
        violations.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.line.cmp(&b.line))
                .then(b.severity.cmp(&a.severity))
        });

        let mut seen = std::collections::HashSet::new();
        violations.retain(|v| {
            let key = format!("{}:{}:{}", v.file, v.line, v.rule_id);
            seen.insert(key)
        });
    }
}

impl Default for RulesEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn downgrade_severity(severity: Severity) -> Severity {
    match severity {
        Severity::Error => Severity::Warning,
        Severity::Warning => Severity::Info,
        Severity::Info => Severity::Hint,
        Severity::Hint => Severity::Hint,
    }
}

fn build_violation(
    id: String,
    rule_id: String,
    pattern: &PatternInfo,
    outlier: &OutlierLocation,
    severity: Severity,
    is_new: bool,
) -> Violation {
    let mut ai_flag_hints = Vec::new();
    if is_new {
        ai_flag_hints.push("new-since-baseline".to_string());
    }

    Violation {
        id,
        file: outlier.file.clone(),
        line: outlier.line,
        column: outlier.column,
        end_line: outlier.end_line,
        end_column: outlier.end_column,
        severity,
        pattern_id: pattern.pattern_id.clone(),
        rule_id,
        message: outlier.message.clone(),
        expected_value: outlier.expected_value.clone(),
        actual_value: outlier.actual_value.clone(),
        explanation: None,
        convention_category: pattern.convention.as_ref().map(|c| c.category),
        convention_confidence: pattern.convention.as_ref().map(|c| c.confidence),
        convention_trend: pattern.convention.as_ref().map(|c| c.trend),
        ai_flag_hints,
    }
}

fn contested_finding(pattern: &PatternInfo, outlier: &OutlierLocation) -> InconsistencyFinding {
    InconsistencyFinding {
        pattern_id: pattern.pattern_id.clone(),
        file: outlier.file.clone(),
        line: outlier.line,
        message: format!(
            "convention for '{}' is contested: {}",
            pattern.pattern_id, outlier.message
        ),
    }
}
