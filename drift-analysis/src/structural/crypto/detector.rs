//! Crypto detection engine with import-check short-circuit optimization.

use regex::Regex;

use super::confidence::{self, ConfidenceInputs};
use super::patterns::{CryptoPattern, CRYPTO_IMPORT_INDICATORS, CRYPTO_PATTERNS};
use super::remediation::get_remediation;
use super::severity::{self, SeverityContext};
use super::types::CryptoFinding;

fn content_hash(content: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Cryptographic failure detector.
pub struct CryptoDetector {
    /// Compiled regex patterns (lazily compiled on first use).
    compiled: Vec<(Regex, &'static CryptoPattern)>,
}

impl CryptoDetector {
    /// Create a new detector, compiling all patterns.
    pub fn new() -> Self {
        let compiled = CRYPTO_PATTERNS.iter()
            .filter_map(|p| Regex::new(p.pattern).ok().map(|re| (re, p)))
            .collect();

        Self { compiled }
    }

    /// Detect cryptographic failures in a file.
    ///
    /// Uses import-check short-circuit: if the file has no crypto-related
    /// imports, skip the whole pattern table for a significant performance win.
    pub fn detect(&self, content: &str, file_path: &str, language: &str) -> Vec<CryptoFinding> {
        if !has_crypto_imports(content) {
            return Vec::new();
        }

        let mut findings = Vec::new();
        let lines: Vec<&str> = content.lines().collect();
        let hash = content_hash(content);

        for (regex, pattern) in &self.compiled {
            if !pattern.languages.contains(&language) {
                continue;
            }

            for (line_idx, line) in lines.iter().enumerate() {
                let trimmed = line.trim();
                if is_comment(trimmed) {
                    continue;
                }

                let Some(captures) = regex.captures(line) else { continue };

                let mut arg_validated = pattern.arg_check.is_none();
                if let Some(rule) = &pattern.arg_check {
                    let Some(captured) = captures.get(1) else { continue };
                    if !rule.passes(captured.as_str()) {
                        continue;
                    }
                    arg_validated = true;
                }

                let adjacent_comment = line_idx.checked_sub(1).and_then(|i| lines.get(i)).copied();
                let sev_ctx = SeverityContext {
                    file_path,
                    matched_line: trimmed,
                    adjacent_comment,
                };
                let severity = severity::adjust(pattern.category.base_severity(), &sev_ctx);

                let import_confirmed = CRYPTO_IMPORT_INDICATORS
                    .iter()
                    .any(|indicator| content.contains(indicator));
                let security_context_detected = sev_ctx.file_path.to_lowercase().contains("auth")
                    || sev_ctx.matched_line.to_lowercase().contains("password");

                let confidence = confidence::compute(&ConfidenceInputs {
                    base_pattern_confidence: 0.7,
                    import_confirmed,
                    argument_validated: arg_validated,
                    security_context_detected,
                });

                let (remediation, remediation_snippet) = get_remediation(pattern.category);

                findings.push(CryptoFinding {
                    pattern_id: pattern.id.to_string(),
                    file: file_path.to_string(),
                    line: (line_idx + 1) as u32,
                    category: pattern.category,
                    description: pattern.description.to_string(),
                    evidence: trimmed.to_string(),
                    confidence,
                    cwe_id: pattern.category.cwe_id(),
                    additional_cwe_ids: Vec::new(),
                    owasp: "A02:2025".to_string(),
                    remediation,
                    remediation_snippet,
                    language: language.to_string(),
                    library: pattern.library.map(str::to_string),
                    algorithm: pattern.algorithm.map(str::to_string),
                    security_context: security_context_detected,
                    severity,
                    content_hash: hash,
                });
            }
        }

        // Deduplicate: same file + line + category = one finding
        findings.sort_by(|a, b| {
            a.file.cmp(&b.file)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| format!("{:?}", a.category).cmp(&format!("{:?}", b.category)))
        });
        findings.dedup_by(|a, b| {
            a.file == b.file && a.line == b.line && a.category == b.category
        });

        findings
    }
}

impl Default for CryptoDetector {
    fn default() -> Self { Self::new() }
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with('#')
        || trimmed.starts_with("/*") || trimmed.starts_with('*')
        || trimmed.starts_with("'''") || trimmed.starts_with("\"\"\"")
}

/// Check if file content contains any crypto-related imports.
fn has_crypto_imports(content: &str) -> bool {
    let check_region = content.chars().take(10_000).collect::<String>();
    CRYPTO_IMPORT_INDICATORS.iter().any(|indicator| check_region.contains(indicator))
        || content.contains("MD5") || content.contains("SHA1")
        || content.contains("Math.random") || content.contains("random.random")
        || content.contains("DES") || content.contains("RC4")
        || content.contains("password") || content.contains("secret")
}
